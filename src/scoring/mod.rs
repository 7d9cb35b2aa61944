pub mod bands;
pub mod config;
pub mod engine;
pub mod rules;
pub mod validation;

pub use bands::{PriceBand, RangeOp};
pub use config::*;
pub use engine::{rank, RankedListing, RuleContribution, ScoringEngine};
pub use rules::{
    default_rules, BuyersRule, ImagesRule, PriceRule, RatingRule, ReviewsRule, ScoringRule,
    SellerRule, TagsRule, BUILTIN_RULE_COUNT,
};
pub use validation::validate_rules;
