use super::bands::PriceBand;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_SCORE: u32 = 10;
pub const DEFAULT_TOP_SELLERS: [&str; 3] = ["Nike", "Adidas", "Zara"];
pub const DEFAULT_POPULAR_TAGS: [&str; 3] = ["durable", "cheap", "free_shipping"];
pub const DEFAULT_MIN_RATING: f64 = 4.0;
pub const DEFAULT_MIN_BUYERS: usize = 10;
pub const DEFAULT_MIN_REVIEWS: u32 = 15;

/// Ascending price bands of width 10 starting at 1; shared boundaries go to
/// the lower band because it is checked first.
pub fn default_price_bands() -> Vec<PriceBand> {
    vec![
        PriceBand::new("1-10", 2),
        PriceBand::new("10-20", 4),
        PriceBand::new("20-30", 6),
        PriceBand::new("30-40", 8),
        PriceBand::new("40-50", 10),
    ]
}

/// Rule parameter configuration.
///
/// Tunes the thresholds and lists the built-in rules use. Every field is
/// optional; unset fields fall back to the built-in defaults. The set of rules
/// itself is fixed.
///
/// Example YAML:
/// ```yaml
/// rules:
///   top_sellers: ["Nike", "Adidas", "Zara"]
///   popular_tags: ["durable", "cheap", "free_shipping"]
///   price_bands:
///     - { range: "1-10", score: 2 }
///     - { range: "10-20", score: 4 }
///   min_rating: 4.0
///   min_buyers: 10
///   min_reviews: 15
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RulesConfig {
    /// Score awarded by threshold and membership rules (default: 10)
    #[serde(default)]
    pub max_score: Option<u32>,

    /// Sellers earning the full seller score (exact, case-sensitive match)
    #[serde(default)]
    pub top_sellers: Option<Vec<String>>,

    /// Tags earning the full tag score when any of them is present
    #[serde(default)]
    pub popular_tags: Option<Vec<String>>,

    /// Price bands checked in order; the first match wins
    #[serde(default)]
    pub price_bands: Option<Vec<PriceBand>>,

    /// Minimum rating for the full rating score (default: 4.0)
    #[serde(default)]
    pub min_rating: Option<f64>,

    /// Minimum buyer count for the full buyer score (default: 10)
    #[serde(default)]
    pub min_buyers: Option<usize>,

    /// Count unique buyer identifiers instead of every entry (default: false)
    #[serde(default)]
    pub distinct_buyers: Option<bool>,

    /// Minimum review count for the full review score (default: 15)
    #[serde(default)]
    pub min_reviews: Option<u32>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            max_score: Some(DEFAULT_MAX_SCORE),
            top_sellers: Some(DEFAULT_TOP_SELLERS.iter().map(|s| s.to_string()).collect()),
            popular_tags: Some(DEFAULT_POPULAR_TAGS.iter().map(|s| s.to_string()).collect()),
            price_bands: Some(default_price_bands()),
            min_rating: Some(DEFAULT_MIN_RATING),
            min_buyers: Some(DEFAULT_MIN_BUYERS),
            distinct_buyers: Some(false),
            min_reviews: Some(DEFAULT_MIN_REVIEWS),
        }
    }
}

impl RulesConfig {
    pub fn max_score(&self) -> u32 {
        self.max_score.unwrap_or(DEFAULT_MAX_SCORE)
    }

    pub fn top_sellers(&self) -> Vec<String> {
        self.top_sellers
            .clone()
            .unwrap_or_else(|| DEFAULT_TOP_SELLERS.iter().map(|s| s.to_string()).collect())
    }

    pub fn popular_tags(&self) -> Vec<String> {
        self.popular_tags
            .clone()
            .unwrap_or_else(|| DEFAULT_POPULAR_TAGS.iter().map(|s| s.to_string()).collect())
    }

    pub fn price_bands(&self) -> Vec<PriceBand> {
        self.price_bands.clone().unwrap_or_else(default_price_bands)
    }

    pub fn min_rating(&self) -> f64 {
        self.min_rating.unwrap_or(DEFAULT_MIN_RATING)
    }

    pub fn min_buyers(&self) -> usize {
        self.min_buyers.unwrap_or(DEFAULT_MIN_BUYERS)
    }

    pub fn distinct_buyers(&self) -> bool {
        self.distinct_buyers.unwrap_or(false)
    }

    pub fn min_reviews(&self) -> u32 {
        self.min_reviews.unwrap_or(DEFAULT_MIN_REVIEWS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_config() {
        let config = RulesConfig::default();

        assert_eq!(config.max_score, Some(10));
        assert_eq!(config.top_sellers().len(), 3);
        assert_eq!(config.price_bands().len(), 5);
        assert_eq!(config.min_rating, Some(4.0));
        assert_eq!(config.min_buyers, Some(10));
        assert_eq!(config.min_reviews, Some(15));
    }

    #[test]
    fn test_rules_config_serde_roundtrip() {
        let config = RulesConfig::default();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: RulesConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_rules_config_parse() {
        let yaml = r#"
top_sellers: ["Acme"]
min_reviews: 3
"#;
        let config: RulesConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.top_sellers(), vec!["Acme".to_string()]);
        assert_eq!(config.min_reviews(), 3);
        // Unset fields fall back to defaults
        assert_eq!(config.min_rating(), 4.0);
        assert_eq!(config.popular_tags().len(), 3);
        assert_eq!(config.price_bands(), default_price_bands());
    }

    #[test]
    fn test_price_bands_parse() {
        let yaml = r#"
price_bands:
  - range: "<=25"
    score: 5
  - { range: ">25", score: 1 }
"#;
        let config: RulesConfig = serde_saphyr::from_str(yaml).unwrap();
        let bands = config.price_bands();
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0], PriceBand::new("<=25", 5));
    }

    #[test]
    fn test_empty_rules_config_parse() {
        let config: RulesConfig = serde_saphyr::from_str("{}").unwrap();
        assert!(config.max_score.is_none());
        assert!(config.top_sellers.is_none());
        assert_eq!(config.max_score(), 10);
        assert!(!config.distinct_buyers());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<RulesConfig, _> = serde_saphyr::from_str("weights: 3\n");
        assert!(result.is_err());
    }
}
