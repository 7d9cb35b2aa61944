use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    #[error("Rule `{rule}` recorded no score for listing #{index} ({listing})")]
    MissingRuleScore {
        rule: String,
        index: usize,
        listing: String,
    },

    #[error("Total score overflow for listing #{index} ({listing})")]
    TotalOverflow { index: usize, listing: String },
}
