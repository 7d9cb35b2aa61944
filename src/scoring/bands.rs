use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub enum RangeOp {
    LessThan(f64),
    LessEqual(f64),
    GreaterThan(f64),
    GreaterEqual(f64),
    Equal(f64),
    Between(f64, f64), // Inclusive range: N-M
}

impl RangeOp {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let op = if let Some(val) = s.strip_prefix(">=") {
            RangeOp::GreaterEqual(val.trim().parse()?)
        } else if let Some(val) = s.strip_prefix("<=") {
            RangeOp::LessEqual(val.trim().parse()?)
        } else if let Some(val) = s.strip_prefix(">") {
            RangeOp::GreaterThan(val.trim().parse()?)
        } else if let Some(val) = s.strip_prefix("<") {
            RangeOp::LessThan(val.trim().parse()?)
        } else if s.contains('-') && !s.starts_with('-') {
            // Range format: "10-20"
            let parts: Vec<&str> = s.split('-').collect();
            if parts.len() != 2 {
                bail!("Invalid range format: {}", s)
            }
            let low: f64 = parts[0].trim().parse()?;
            let high: f64 = parts[1].trim().parse()?;
            if low > high {
                bail!("Range bounds out of order: {}", s)
            }
            RangeOp::Between(low, high)
        } else {
            RangeOp::Equal(s.parse()?)
        };

        if !op.bounds_finite() {
            bail!("Range bounds must be finite: {}", s)
        }
        Ok(op)
    }

    /// NaN never matches any range.
    pub fn matches(&self, value: f64) -> bool {
        match self {
            RangeOp::LessThan(n) => value < *n,
            RangeOp::LessEqual(n) => value <= *n,
            RangeOp::GreaterThan(n) => value > *n,
            RangeOp::GreaterEqual(n) => value >= *n,
            RangeOp::Equal(n) => value == *n,
            RangeOp::Between(low, high) => value >= *low && value <= *high,
        }
    }

    fn bounds_finite(&self) -> bool {
        match self {
            RangeOp::LessThan(n)
            | RangeOp::LessEqual(n)
            | RangeOp::GreaterThan(n)
            | RangeOp::GreaterEqual(n)
            | RangeOp::Equal(n) => n.is_finite(),
            RangeOp::Between(low, high) => low.is_finite() && high.is_finite(),
        }
    }
}

/// Price band.
///
/// Maps a price range to the score awarded when a listing's price falls in it.
/// Range format: "<N", "<=N", ">N", ">=N", "N", "N-M" (inclusive range)
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PriceBand {
    /// Range expression (e.g., "1-10", ">=100")
    pub range: String,

    /// Score awarded on match
    pub score: u32,
}

impl PriceBand {
    pub fn new(range: &str, score: u32) -> Self {
        Self {
            range: range.to_string(),
            score,
        }
    }
}

/// A price band with its range already parsed
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledBand {
    pub range: RangeOp,
    pub score: u32,
}

/// Parse every band, skipping ones whose range does not parse.
///
/// Invalid bands are reported by validation at startup, so by the time the
/// engine runs they have already been rejected.
pub fn compile_bands(bands: &[PriceBand]) -> Vec<CompiledBand> {
    bands
        .iter()
        .filter_map(|band| {
            RangeOp::parse(&band.range).ok().map(|range| CompiledBand {
                range,
                score: band.score,
            })
        })
        .collect()
}

/// Score of the first band matching `value`, or 0 when none matches.
pub fn first_match(bands: &[CompiledBand], value: f64) -> u32 {
    bands
        .iter()
        .find(|band| band.range.matches(value))
        .map(|band| band.score)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range_less_than() {
        let range = RangeOp::parse("<100").unwrap();
        assert!(range.matches(50.0));
        assert!(!range.matches(100.0));
        assert!(!range.matches(150.0));
    }

    #[test]
    fn test_parse_range_less_equal() {
        let range = RangeOp::parse("<=100").unwrap();
        assert!(range.matches(100.0));
        assert!(!range.matches(100.01));
    }

    #[test]
    fn test_parse_range_greater_than() {
        let range = RangeOp::parse(">100").unwrap();
        assert!(!range.matches(100.0));
        assert!(range.matches(100.5));
    }

    #[test]
    fn test_parse_range_greater_equal() {
        let range = RangeOp::parse(">= 50").unwrap();
        assert!(!range.matches(49.99));
        assert!(range.matches(50.0));
    }

    #[test]
    fn test_parse_range_equal() {
        let range = RangeOp::parse("0").unwrap();
        assert!(range.matches(0.0));
        assert!(!range.matches(0.5));
    }

    #[test]
    fn test_parse_range_between_decimal() {
        let range = RangeOp::parse("1.5 - 9.99").unwrap();
        assert_eq!(range, RangeOp::Between(1.5, 9.99));
        assert!(range.matches(1.5));
        assert!(range.matches(9.99));
        assert!(!range.matches(10.0));
    }

    #[test]
    fn test_parse_range_rejects_garbage() {
        assert!(RangeOp::parse("cheap").is_err());
        assert!(RangeOp::parse("1-2-3").is_err());
        assert!(RangeOp::parse("20-10").is_err());
        assert!(RangeOp::parse("<inf").is_err());
    }

    #[test]
    fn test_nan_never_matches() {
        assert!(!RangeOp::parse("<100").unwrap().matches(f64::NAN));
        assert!(!RangeOp::parse("0-100").unwrap().matches(f64::NAN));
    }

    #[test]
    fn test_first_match_wins_on_shared_boundary() {
        let bands = compile_bands(&[PriceBand::new("1-10", 2), PriceBand::new("10-20", 4)]);
        assert_eq!(first_match(&bands, 10.0), 2);
        assert_eq!(first_match(&bands, 10.01), 4);
        assert_eq!(first_match(&bands, 0.5), 0);
    }

    #[test]
    fn test_compile_skips_invalid_bands() {
        let bands = compile_bands(&[PriceBand::new("bad", 2), PriceBand::new(">=0", 4)]);
        assert_eq!(bands.len(), 1);
        assert_eq!(first_match(&bands, 3.0), 4);
    }
}
