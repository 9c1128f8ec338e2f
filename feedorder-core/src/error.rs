//! Failure taxonomy for a check run.
//!
//! Every variant is fatal: it is raised where it is detected and ends the
//! run. Nothing here is retried.

use crate::validator::ViolationReport;

#[derive(thiserror::Error, Debug)]
pub enum CheckError {
    /// An entry lacks the age attribute; the listing markup changed.
    #[error("age attribute `{attribute}` is missing from entry #{position} on {url}")]
    MissingAttribute {
        attribute: String,
        position: usize,
        url: String,
    },

    /// No further page exists but fewer than `limit` entries were seen.
    #[error(
        "at {url}, the advance control is missing or no more pages are available \
         ({collected} of {limit} entries collected)"
    )]
    PaginationExhausted {
        url: String,
        collected: usize,
        limit: usize,
    },

    /// The label does not split into exactly two tokens.
    #[error("expected age label to have 2 items, but got \"{label}\" at entry #{position}")]
    MalformedLabel { label: String, position: usize },

    /// The second label token is not a base-10 integer.
    #[error("expected a number, but got \"{token}\" at entry #{position}")]
    NonNumericTimestamp { token: String, position: usize },

    #[error(transparent)]
    OrderViolation(#[from] ViolationReport),

    #[error("collected {actual} entries, expected exactly {expected}")]
    CountMismatch { expected: usize, actual: usize },

    #[error("limit must be a positive integer")]
    InvalidLimit,

    /// The browser backend failed (session lost, script error, timeout).
    #[error("Driver error: {0}")]
    Driver(#[from] anyhow::Error),
}

impl CheckError {
    /// Stable tag for machine-readable output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingAttribute { .. } => "missing_attribute",
            Self::PaginationExhausted { .. } => "pagination_exhausted",
            Self::MalformedLabel { .. } => "malformed_label",
            Self::NonNumericTimestamp { .. } => "non_numeric_timestamp",
            Self::OrderViolation(_) => "order_violation",
            Self::CountMismatch { .. } => "count_mismatch",
            Self::InvalidLimit => "invalid_limit",
            Self::Driver(_) => "driver",
        }
    }
}

pub type Result<T> = std::result::Result<T, CheckError>;
