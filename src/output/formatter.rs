use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::listing::Listing;
use crate::scoring::{RankedListing, RuleContribution};

/// One total per line, in input order.
/// Listings that were never scored print as 0.
pub fn format_totals(listings: &[Listing]) -> String {
    listings
        .iter()
        .map(|listing| listing.total_score().unwrap_or(0).to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format ranked listings as a table with columns: Rank, Total, Name, Seller
/// No headers. Rank column is 1-based and right-aligned with a trailing dot.
pub fn format_ranked_table(ranked: &[RankedListing], use_colors: bool) -> String {
    format_ranked_table_with_width(ranked, use_colors, get_terminal_width())
}

fn format_ranked_table_with_width(
    ranked: &[RankedListing],
    use_colors: bool,
    term_width: Option<usize>,
) -> String {
    if ranked.is_empty() {
        return "No listings found.".to_string();
    }

    let rank_width = 3;
    let total_width = 5;
    let separator = "  ";

    ranked
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let rank_str = format!("{:>2}.", idx + 1);
            let total_str = format!("{:>width$}", entry.total, width = total_width);
            let seller = &entry.listing.seller;

            let fixed_width =
                rank_width + 1 + total_width + separator.len() * 2 + seller.chars().count();
            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_name(&entry.listing.name, width - fixed_width)
                }
                // Very narrow terminal
                Some(_) => truncate_name(&entry.listing.name, 20),
                None => entry.listing.name.clone(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}",
                    rank_str.dimmed(),
                    total_str.bold(),
                    separator,
                    name,
                    separator,
                    seller.cyan()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    rank_str, total_str, separator, name, separator, seller
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format ranked listings as tab-separated values for scripting
/// Columns: total, name, seller (no headers, no colors)
pub fn format_tsv(ranked: &[RankedListing]) -> String {
    ranked
        .iter()
        .map(|entry| {
            format!(
                "{}\t{}\t{}",
                entry.total, entry.listing.name, entry.listing.seller
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format listings, scores included, as a pretty JSON array
pub fn format_json(listings: &[Listing]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(listings)
}

/// Multi-line per-rule breakdown of one listing
pub fn format_breakdown(
    listing: &Listing,
    contributions: &[RuleContribution],
    use_colors: bool,
) -> String {
    let label_width = contributions
        .iter()
        .map(|c| c.rule.len())
        .max()
        .unwrap_or(0);
    let total = listing.total_score().unwrap_or(0);
    let max_total: u64 = contributions.iter().map(|c| u64::from(c.max_score)).sum();

    let mut lines = Vec::with_capacity(contributions.len() + 2);
    if use_colors {
        lines.push(format!("{}", listing.to_string().bold()));
    } else {
        lines.push(listing.to_string());
    }

    for contribution in contributions {
        let label = format!("{:<width$}", contribution.rule, width = label_width);
        let value = format!("{}/{}", contribution.score, contribution.max_score);
        if use_colors && contribution.score == 0 {
            lines.push(format!("  {}  {}", label, value.dimmed()));
        } else if use_colors {
            lines.push(format!("  {}  {}", label, value.green()));
        } else {
            lines.push(format!("  {}  {}", label, value));
        }
    }

    let label = format!("{:<width$}", "total", width = label_width);
    let value = format!("{}/{}", total, max_total);
    if use_colors {
        lines.push(format!("  {}  {}", label.bold(), value.bold()));
    } else {
        lines.push(format!("  {}  {}", label, value));
    }

    lines.join("\n")
}
