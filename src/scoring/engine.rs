use super::config::RulesConfig;
use super::rules::{default_rules, ScoringRule};
use crate::error::ScoringError;
use crate::listing::{Listing, TOTAL_SCORE_KEY};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleContribution {
    pub rule: &'static str, // e.g. "seller_score", "price_score"
    pub score: u32,         // Recorded score, 0 if the rule has not run
    pub max_score: u32,
}

/// A listing in ranked order
#[derive(Debug, Clone)]
pub struct RankedListing<'a> {
    pub position: usize, // 1-based position in the input collection
    pub total: u32,
    pub listing: &'a Listing,
}

/// Runs every registered rule over a collection of listings and records each
/// listing's total.
pub struct ScoringEngine {
    rules: Vec<Box<dyn ScoringRule>>,
}

impl ScoringEngine {
    /// Engine with the seven built-in rules, in their fixed order
    pub fn new(config: &RulesConfig) -> Self {
        Self::with_rules(default_rules(config))
    }

    pub fn with_rules(rules: Vec<Box<dyn ScoringRule>>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Box<dyn ScoringRule>] {
        &self.rules
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Highest total any listing can reach, widened so it cannot wrap
    pub fn max_total(&self) -> u64 {
        self.rules.iter().map(|rule| u64::from(rule.max_score())).sum()
    }

    /// Score every listing in place.
    ///
    /// Each rule visits every listing in registration order, then every
    /// listing's `total_score` is recomputed from the registered rules' scores.
    /// Running it again yields the same totals.
    ///
    /// # Errors
    ///
    /// Fails if a registered rule left no score on some listing, or the sum
    /// does not fit in a `u32`. Per-rule scores are already refreshed by then,
    /// but no listing's `total_score` is touched: totals are written only once
    /// every listing has aggregated.
    pub fn score(&self, listings: &mut [Listing]) -> Result<(), ScoringError> {
        debug!(
            listings = listings.len(),
            rules = self.rules.len(),
            "scoring listings"
        );

        self.evaluate_rules(listings);

        let totals = listings
            .iter()
            .enumerate()
            .map(|(index, listing)| self.aggregate(index, listing))
            .collect::<Result<Vec<u32>, ScoringError>>()?;

        for (listing, total) in listings.iter_mut().zip(totals) {
            listing.record_score(TOTAL_SCORE_KEY, total);
        }

        Ok(())
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate_rules(&self, listings: &mut [Listing]) {
        for rule in &self.rules {
            rule.calculate(listings);
            debug!(rule = rule.name(), "rule applied");
        }
    }

    /// Each listing is owned by one worker, which applies every rule to it.
    #[cfg(feature = "parallel")]
    fn evaluate_rules(&self, listings: &mut [Listing]) {
        use rayon::prelude::*;

        listings.par_iter_mut().for_each(|listing| {
            for rule in &self.rules {
                rule.calculate(std::slice::from_mut(listing));
            }
        });
        debug!(rules = ?self.rule_names(), "rules applied in parallel");
    }

    fn aggregate(&self, index: usize, listing: &Listing) -> Result<u32, ScoringError> {
        let mut total: u32 = 0;
        for rule in &self.rules {
            let score = listing
                .score(rule.name())
                .ok_or_else(|| ScoringError::MissingRuleScore {
                    rule: rule.name().to_string(),
                    index: index + 1,
                    listing: listing.to_string(),
                })?;
            total = total
                .checked_add(score)
                .ok_or_else(|| ScoringError::TotalOverflow {
                    index: index + 1,
                    listing: listing.to_string(),
                })?;
        }

        debug!(listing = %listing, total, "aggregated");
        Ok(total)
    }

    /// Per-rule scores recorded on `listing`, in registration order
    pub fn breakdown(&self, listing: &Listing) -> Vec<RuleContribution> {
        self.rules
            .iter()
            .map(|rule| RuleContribution {
                rule: rule.name(),
                score: listing.score(rule.name()).unwrap_or(0),
                max_score: rule.max_score(),
            })
            .collect()
    }
}

/// Order scored listings by total, highest first.
///
/// Ties keep input order. Listings without a total rank as 0.
pub fn rank(listings: &[Listing]) -> Vec<RankedListing<'_>> {
    let mut ranked: Vec<RankedListing> = listings
        .iter()
        .enumerate()
        .map(|(idx, listing)| RankedListing {
            position: idx + 1,
            total: listing.total_score().unwrap_or(0),
            listing,
        })
        .collect();

    // Stable sort keeps input order among equal totals
    ranked.sort_by(|a, b| b.total.cmp(&a.total));
    ranked
}
