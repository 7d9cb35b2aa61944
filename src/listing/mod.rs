pub mod loader;
pub mod sample;
pub mod types;

pub use loader::load_listings;
pub use sample::sample_catalog;
pub use types::{Listing, MAX_RATING, TOTAL_SCORE_KEY};
