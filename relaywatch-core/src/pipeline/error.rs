use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("invalid filter pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl FilterError {
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum DedupError {
    #[error("deduplication took longer than {budget:?}")]
    Timeout { budget: Duration },
}
