use super::types::Listing;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Load listings from a JSON or YAML file
///
/// Files ending in `.json` are parsed as JSON; anything else is parsed as YAML.
/// Attributes outside their documented range are logged, not rejected.
///
/// # Errors
///
/// Returns an error if the file does not exist, cannot be read, or does not
/// hold a sequence of listings.
pub fn load_listings(path: &Path) -> Result<Vec<Listing>> {
    if !path.exists() {
        anyhow::bail!("Listings file not found at {}", path.display());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read listings file at {}", path.display()))?;

    let listings = if is_json(path) {
        serde_json::from_str::<Vec<Listing>>(&content)
            .with_context(|| format!("Failed to parse listings: invalid JSON in {}", path.display()))?
    } else {
        serde_saphyr::from_str::<Vec<Listing>>(&content)
            .with_context(|| format!("Failed to parse listings: invalid YAML in {}", path.display()))?
    };

    debug!(count = listings.len(), path = %path.display(), "loaded listings");

    for listing in &listings {
        for warning in listing.validate() {
            warn!("{}", warning);
        }
    }

    Ok(listings)
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
