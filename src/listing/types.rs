use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Score key holding the sum of every per-rule score.
pub const TOTAL_SCORE_KEY: &str = "total_score";

/// Highest rating a listing can legitimately carry.
pub const MAX_RATING: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Listing {
    pub name: String,
    pub seller: String,
    pub price: f64,
    pub rating: f64,        // Expected range 0.0-5.0
    #[serde(default)]
    pub buyers: Vec<String>, // Buyer identifiers, duplicates allowed
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub reviews: u32,
    // Filled in by the scoring engine, never read from input
    #[serde(default, skip_deserializing)]
    scores: BTreeMap<String, u32>,
}

impl Listing {
    pub fn new(name: impl Into<String>, seller: impl Into<String>, price: f64, rating: f64) -> Self {
        Self {
            name: name.into(),
            seller: seller.into(),
            price,
            rating,
            buyers: Vec::new(),
            images: Vec::new(),
            tags: BTreeSet::new(),
            reviews: 0,
            scores: BTreeMap::new(),
        }
    }

    pub fn with_buyers<I, S>(mut self, buyers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.buyers = buyers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images = images.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_reviews(mut self, reviews: u32) -> Self {
        self.reviews = reviews;
        self
    }

    /// Store a score under `key`, replacing any previous value.
    pub fn record_score(&mut self, key: &str, value: u32) {
        self.scores.insert(key.to_string(), value);
    }

    pub fn scores(&self) -> &BTreeMap<String, u32> {
        &self.scores
    }

    pub fn score(&self, key: &str) -> Option<u32> {
        self.scores.get(key).copied()
    }

    /// Total score, present only after a full engine pass
    pub fn total_score(&self) -> Option<u32> {
        self.score(TOTAL_SCORE_KEY)
    }

    /// Number of distinct buyer identifiers
    pub fn distinct_buyers(&self) -> usize {
        self.buyers.iter().collect::<BTreeSet<_>>().len()
    }

    /// Check descriptive attributes against their documented ranges.
    ///
    /// Out-of-range values are reported, not rejected: the affected rules
    /// score them as zero.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !self.price.is_finite() || self.price < 0.0 {
            warnings.push(format!("{}: price {} is not a non-negative number", self, self.price));
        }

        if !self.rating.is_finite() || !(0.0..=MAX_RATING).contains(&self.rating) {
            warnings.push(format!(
                "{}: rating {} is outside 0.0-{:.1}",
                self, self.rating, MAX_RATING
            ));
        }

        warnings
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, by {}", self.name, self.seller)
    }
}
