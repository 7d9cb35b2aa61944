use super::bands::RangeOp;
use super::config::RulesConfig;
use super::rules::BUILTIN_RULE_COUNT;
use crate::listing::MAX_RATING;

/// Validate rule configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_rules(config: &RulesConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let max_score = config.max_score();

    if max_score == 0 {
        errors.push("rules.max_score: must be greater than zero".to_string());
    }

    // Every rule may award max_score, and the total must still fit
    if max_score.checked_mul(BUILTIN_RULE_COUNT).is_none() {
        errors.push(format!(
            "rules.max_score: {} is too large, totals of {} rules would overflow (max {})",
            max_score,
            BUILTIN_RULE_COUNT,
            u32::MAX / BUILTIN_RULE_COUNT
        ));
    }

    if let Some(min_rating) = config.min_rating {
        if !min_rating.is_finite() || !(0.0..=MAX_RATING).contains(&min_rating) {
            errors.push(format!(
                "rules.min_rating: {} is outside 0.0-{:.1}",
                min_rating, MAX_RATING
            ));
        }
    }

    // Defaults are checked too: a lowered max_score can undercut them
    let bands = config.price_bands();
    if bands.is_empty() {
        errors.push("rules.price_bands: at least one band is required".to_string());
    }

    for (i, band) in bands.iter().enumerate() {
        if let Err(e) = RangeOp::parse(&band.range) {
            errors.push(format!(
                "rules.price_bands[{}].range: invalid '{}' - {}",
                i, band.range, e
            ));
        }
        if band.score > max_score {
            errors.push(format!(
                "rules.price_bands[{}].score: {} exceeds max_score {}",
                i, band.score, max_score
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
