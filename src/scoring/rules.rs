//! Built-in scoring rules.
//!
//! Each rule reads one listing's attributes and nothing else, and writes a
//! single score under its own key. Rules never see each other's output, so
//! they can run in any order.

use super::bands::{compile_bands, first_match, CompiledBand};
use super::config::RulesConfig;
use crate::listing::{Listing, MAX_RATING};
use std::collections::HashSet;

/// One independent ranking criterion.
pub trait ScoringRule: Send + Sync {
    /// Key the score is stored under; unique across registered rules
    fn name(&self) -> &'static str;

    /// Upper bound of `evaluate`
    fn max_score(&self) -> u32;

    /// Score a single listing
    fn evaluate(&self, listing: &Listing) -> u32;

    /// Record this rule's score on every listing, replacing any earlier value.
    ///
    /// The engine may hand this any sub-slice of the collection, down to a
    /// single listing, so an override must treat listings independently.
    fn calculate(&self, listings: &mut [Listing]) {
        for listing in listings.iter_mut() {
            let score = self.evaluate(listing);
            listing.record_score(self.name(), score);
        }
    }
}

/// Full score for sellers on the top-seller list.
#[derive(Debug, Clone)]
pub struct SellerRule {
    top_sellers: HashSet<String>,
    max_score: u32,
}

impl SellerRule {
    pub fn new(config: &RulesConfig) -> Self {
        Self {
            top_sellers: config.top_sellers().into_iter().collect(),
            max_score: config.max_score(),
        }
    }
}

impl ScoringRule for SellerRule {
    fn name(&self) -> &'static str {
        "seller_score"
    }

    fn max_score(&self) -> u32 {
        self.max_score
    }

    fn evaluate(&self, listing: &Listing) -> u32 {
        if self.top_sellers.contains(&listing.seller) {
            self.max_score
        } else {
            0
        }
    }
}

/// Banded score by price. Bands are checked in order and the first match
/// wins, so with inclusive ascending bands a shared boundary goes to the lower
/// band. Prices outside every band (negative, NaN) score 0.
#[derive(Debug, Clone)]
pub struct PriceRule {
    bands: Vec<CompiledBand>,
    max_score: u32,
}

impl PriceRule {
    pub fn new(config: &RulesConfig) -> Self {
        Self {
            bands: compile_bands(&config.price_bands()),
            max_score: config.max_score(),
        }
    }
}

impl ScoringRule for PriceRule {
    fn name(&self) -> &'static str {
        "price_score"
    }

    fn max_score(&self) -> u32 {
        self.max_score
    }

    fn evaluate(&self, listing: &Listing) -> u32 {
        first_match(&self.bands, listing.price).min(self.max_score)
    }
}

/// Full score when any tag is a popular one.
#[derive(Debug, Clone)]
pub struct TagsRule {
    popular_tags: HashSet<String>,
    max_score: u32,
}

impl TagsRule {
    pub fn new(config: &RulesConfig) -> Self {
        Self {
            popular_tags: config.popular_tags().into_iter().collect(),
            max_score: config.max_score(),
        }
    }
}

impl ScoringRule for TagsRule {
    fn name(&self) -> &'static str {
        "product_tags_score"
    }

    fn max_score(&self) -> u32 {
        self.max_score
    }

    fn evaluate(&self, listing: &Listing) -> u32 {
        if listing.tags.iter().any(|tag| self.popular_tags.contains(tag)) {
            self.max_score
        } else {
            0
        }
    }
}

/// Full score when the listing has at least one image.
#[derive(Debug, Clone)]
pub struct ImagesRule {
    max_score: u32,
}

impl ImagesRule {
    pub fn new(config: &RulesConfig) -> Self {
        Self {
            max_score: config.max_score(),
        }
    }
}

impl ScoringRule for ImagesRule {
    fn name(&self) -> &'static str {
        "product_images_score"
    }

    fn max_score(&self) -> u32 {
        self.max_score
    }

    fn evaluate(&self, listing: &Listing) -> u32 {
        if listing.images.is_empty() {
            0
        } else {
            self.max_score
        }
    }
}

/// Full score at or above the rating threshold, no partial credit.
/// Ratings outside 0.0-5.0 score 0.
#[derive(Debug, Clone)]
pub struct RatingRule {
    min_rating: f64,
    max_score: u32,
}

impl RatingRule {
    pub fn new(config: &RulesConfig) -> Self {
        Self {
            min_rating: config.min_rating(),
            max_score: config.max_score(),
        }
    }
}

impl ScoringRule for RatingRule {
    fn name(&self) -> &'static str {
        "ratings_score"
    }

    fn max_score(&self) -> u32 {
        self.max_score
    }

    fn evaluate(&self, listing: &Listing) -> u32 {
        let rating = listing.rating;
        if rating <= MAX_RATING && rating >= self.min_rating {
            self.max_score
        } else {
            0
        }
    }
}

/// Full score once enough buyers have bought the listing.
#[derive(Debug, Clone)]
pub struct BuyersRule {
    min_buyers: usize,
    distinct: bool,
    max_score: u32,
}

impl BuyersRule {
    pub fn new(config: &RulesConfig) -> Self {
        Self {
            min_buyers: config.min_buyers(),
            distinct: config.distinct_buyers(),
            max_score: config.max_score(),
        }
    }
}

impl ScoringRule for BuyersRule {
    fn name(&self) -> &'static str {
        "buyers_score"
    }

    fn max_score(&self) -> u32 {
        self.max_score
    }

    fn evaluate(&self, listing: &Listing) -> u32 {
        let count = if self.distinct {
            listing.distinct_buyers()
        } else {
            listing.buyers.len()
        };

        if count >= self.min_buyers {
            self.max_score
        } else {
            0
        }
    }
}

/// Full score once the listing has enough reviews.
#[derive(Debug, Clone)]
pub struct ReviewsRule {
    min_reviews: u32,
    max_score: u32,
}

impl ReviewsRule {
    pub fn new(config: &RulesConfig) -> Self {
        Self {
            min_reviews: config.min_reviews(),
            max_score: config.max_score(),
        }
    }
}

impl ScoringRule for ReviewsRule {
    fn name(&self) -> &'static str {
        "product_reviews_score"
    }

    fn max_score(&self) -> u32 {
        self.max_score
    }

    fn evaluate(&self, listing: &Listing) -> u32 {
        if listing.reviews >= self.min_reviews {
            self.max_score
        } else {
            0
        }
    }
}

/// Number of rules `default_rules` registers
pub const BUILTIN_RULE_COUNT: u32 = 7;

/// The built-in rules in their fixed evaluation order.
pub fn default_rules(config: &RulesConfig) -> Vec<Box<dyn ScoringRule>> {
    vec![
        Box::new(SellerRule::new(config)),
        Box::new(PriceRule::new(config)),
        Box::new(TagsRule::new(config)),
        Box::new(ImagesRule::new(config)),
        Box::new(RatingRule::new(config)),
        Box::new(BuyersRule::new(config)),
        Box::new(ReviewsRule::new(config)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing_with_price(price: f64) -> Listing {
        Listing::new("Item", "Nobody", price, 0.0)
    }

    fn price_score(price: f64) -> u32 {
        PriceRule::new(&RulesConfig::default()).evaluate(&listing_with_price(price))
    }

    #[test]
    fn test_seller_on_list() {
        let rule = SellerRule::new(&RulesConfig::default());
        assert_eq!(rule.evaluate(&Listing::new("Shoes", "Nike", 10.0, 4.0)), 10);
        assert_eq!(rule.evaluate(&Listing::new("Shirt", "Zara", 10.0, 4.0)), 10);
    }

    #[test]
    fn test_seller_match_is_exact() {
        let rule = SellerRule::new(&RulesConfig::default());
        assert_eq!(rule.evaluate(&Listing::new("Shoes", "nike", 10.0, 4.0)), 0);
        assert_eq!(rule.evaluate(&Listing::new("Pants", "Levi's", 10.0, 4.0)), 0);
    }

    #[test]
    fn test_seller_configured_list() {
        let config = RulesConfig {
            top_sellers: Some(vec!["Acme".to_string()]),
            ..RulesConfig::default()
        };
        let rule = SellerRule::new(&config);
        assert_eq!(rule.evaluate(&Listing::new("Anvil", "Acme", 10.0, 4.0)), 10);
        assert_eq!(rule.evaluate(&Listing::new("Shoes", "Nike", 10.0, 4.0)), 0);
    }

    #[test]
    fn test_price_bands() {
        assert_eq!(price_score(1.0), 2);
        assert_eq!(price_score(5.0), 2);
        assert_eq!(price_score(12.24), 4);
        assert_eq!(price_score(25.0), 6);
        assert_eq!(price_score(39.95), 8);
        assert_eq!(price_score(42.95), 10);
    }

    #[test]
    fn test_price_shared_boundary_goes_to_lower_band() {
        assert_eq!(price_score(10.0), 2);
        assert_eq!(price_score(20.0), 4);
        assert_eq!(price_score(30.0), 6);
        assert_eq!(price_score(40.0), 8);
    }

    #[test]
    fn test_price_outside_bands() {
        assert_eq!(price_score(0.5), 0);
        assert_eq!(price_score(50.0), 10);
        assert_eq!(price_score(50.01), 0);
        assert_eq!(price_score(-5.0), 0);
        assert_eq!(price_score(f64::NAN), 0);
    }

    #[test]
    fn test_tags_intersection() {
        let rule = TagsRule::new(&RulesConfig::default());
        let hit = Listing::new("Shoes", "Nike", 10.0, 4.0).with_tags(["comfy", "free_shipping"]);
        let miss = Listing::new("Shoes", "Nike", 10.0, 4.0).with_tags(["comfy", "black"]);
        let empty = Listing::new("Shoes", "Nike", 10.0, 4.0);
        assert_eq!(rule.evaluate(&hit), 10);
        assert_eq!(rule.evaluate(&miss), 0);
        assert_eq!(rule.evaluate(&empty), 0);
    }

    #[test]
    fn test_images_presence() {
        let rule = ImagesRule::new(&RulesConfig::default());
        let with = Listing::new("Shoes", "Nike", 10.0, 4.0).with_images(["a.jpeg"]);
        let without = Listing::new("Shoes", "Nike", 10.0, 4.0);
        assert_eq!(rule.evaluate(&with), 10);
        assert_eq!(rule.evaluate(&without), 0);
    }

    #[test]
    fn test_rating_threshold() {
        let rule = RatingRule::new(&RulesConfig::default());
        let score = |rating| rule.evaluate(&Listing::new("Item", "Nobody", 10.0, rating));
        assert_eq!(score(4.0), 10);
        assert_eq!(score(4.73), 10);
        assert_eq!(score(5.0), 10);
        assert_eq!(score(3.98), 0);
        assert_eq!(score(0.0), 0);
    }

    #[test]
    fn test_rating_out_of_range_scores_zero() {
        let rule = RatingRule::new(&RulesConfig::default());
        let score = |rating| rule.evaluate(&Listing::new("Item", "Nobody", 10.0, rating));
        assert_eq!(score(5.5), 0);
        assert_eq!(score(f64::NAN), 0);
        assert_eq!(score(f64::INFINITY), 0);
    }

    #[test]
    fn test_buyers_threshold() {
        let rule = BuyersRule::new(&RulesConfig::default());
        let nine = Listing::new("Item", "Nobody", 10.0, 4.0).with_buyers(vec!["b"; 9]);
        let ten = Listing::new("Item", "Nobody", 10.0, 4.0).with_buyers(vec!["b"; 10]);
        assert_eq!(rule.evaluate(&nine), 0);
        // Duplicates count by default
        assert_eq!(rule.evaluate(&ten), 10);
    }

    #[test]
    fn test_buyers_distinct_count() {
        let config = RulesConfig {
            distinct_buyers: Some(true),
            ..RulesConfig::default()
        };
        let rule = BuyersRule::new(&config);
        let repeat = Listing::new("Item", "Nobody", 10.0, 4.0).with_buyers(vec!["b"; 10]);
        let unique = Listing::new("Item", "Nobody", 10.0, 4.0)
            .with_buyers((0..10).map(|i| format!("buyer-{}", i)));
        assert_eq!(rule.evaluate(&repeat), 0);
        assert_eq!(rule.evaluate(&unique), 10);
    }

    #[test]
    fn test_reviews_threshold() {
        let rule = ReviewsRule::new(&RulesConfig::default());
        let score = |reviews| {
            rule.evaluate(&Listing::new("Item", "Nobody", 10.0, 4.0).with_reviews(reviews))
        };
        assert_eq!(score(14), 0);
        assert_eq!(score(15), 10);
        assert_eq!(score(54), 10);
    }

    #[test]
    fn test_calculate_writes_one_entry_per_listing() {
        let rule = ReviewsRule::new(&RulesConfig::default());
        let mut listings = vec![
            Listing::new("A", "Nobody", 10.0, 4.0).with_reviews(16),
            Listing::new("B", "Nobody", 10.0, 4.0).with_reviews(1),
        ];
        rule.calculate(&mut listings);
        for listing in &listings {
            assert_eq!(listing.scores().len(), 1);
        }
        assert_eq!(listings[0].score("product_reviews_score"), Some(10));
        assert_eq!(listings[1].score("product_reviews_score"), Some(0));
    }

    fn bound_listings() -> Vec<Listing> {
        vec![
            Listing::new("Zero", "Nobody", 0.0, 0.0),
            Listing::new("Full", "Nike", 45.0, 5.0)
                .with_buyers(vec!["b"; 20])
                .with_images(["a.jpeg"])
                .with_tags(["cheap"])
                .with_reviews(100),
            Listing::new("Broken", "Adidas", -1.0, 9.0),
        ]
    }

    #[test]
    fn test_scores_within_bounds() {
        let rules = default_rules(&RulesConfig::default());
        let listings = bound_listings();
        for rule in &rules {
            for listing in &listings {
                assert!(rule.evaluate(listing) <= rule.max_score(), "{} over max", rule.name());
            }
        }
    }

    #[test]
    fn test_calculate_records_only_own_key_within_bounds() {
        for rule in default_rules(&RulesConfig::default()) {
            let mut listings = bound_listings();
            rule.calculate(&mut listings);

            for listing in &listings {
                assert_eq!(listing.scores().len(), 1, "{} wrote extra keys", rule.name());
                let score = listing.score(rule.name());
                assert!(score.is_some(), "{} recorded nothing", rule.name());
                assert!(score <= Some(rule.max_score()), "{} over max", rule.name());
            }
        }
    }

    #[test]
    fn test_rule_names_unique() {
        let rules = default_rules(&RulesConfig::default());
        let names: HashSet<&str> = rules.iter().map(|r| r.name()).collect();
        assert_eq!(names.len(), BUILTIN_RULE_COUNT as usize);
    }
}
