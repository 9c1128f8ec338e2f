use serde::Serialize;

use crate::label::Timestamp;

/// First place where a sequence stops being non-increasing.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[error(
    "entry #{position} is not in newest to oldest order: \
     the timestamp {offending} should be <= {prior}"
)]
pub struct ViolationReport {
    /// 1-based position of the offending entry.
    pub position: usize,
    /// Timestamp of the entry right before it, the upper bound it broke.
    pub prior: Timestamp,
    pub offending: Timestamp,
}

/// Check that every timestamp is `<=` its predecessor.
///
/// Ties are accepted. Stops at the first violation.
pub fn validate_order(timestamps: &[Timestamp]) -> Result<(), ViolationReport> {
    match timestamps
        .windows(2)
        .position(|pair| pair[1] > pair[0])
    {
        Some(i) => Err(ViolationReport {
            position: i + 2,
            prior: timestamps[i],
            offending: timestamps[i + 1],
        }),
        None => Ok(()),
    }
}
