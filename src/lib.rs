//! Rank marketplace listings by summing independent scoring rules.
//!
//! Listings come from a file or the built-in sample catalog, every registered
//! [`scoring::ScoringRule`] records one score per listing, and the
//! [`scoring::ScoringEngine`] adds a `total_score` to each.

pub mod config;
pub mod error;
pub mod listing;
pub mod output;
pub mod scoring;

pub use error::ScoringError;
pub use listing::Listing;
pub use scoring::{ScoringEngine, ScoringRule};
