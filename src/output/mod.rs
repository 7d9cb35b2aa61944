pub mod formatter;

pub use formatter::{
    format_breakdown, format_json, format_ranked_table, format_totals, format_tsv,
    should_use_colors,
};
