//! Age labels and their timestamp payload.
//!
//! A listing tags each entry with `"<ISO-8601 datetime> <epoch seconds>"`,
//! e.g. `"2025-03-20T15:06:24 1742483184"`. Only the epoch half is
//! interpreted; the datetime half is carried for diagnostics.

use std::fmt;

use crate::error::{CheckError, Result};

/// Epoch seconds extracted from an [`AgeLabel`].
pub type Timestamp = i64;

/// Raw age attribute read from one listing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgeLabel(String);

impl AgeLabel {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse this label, reporting failures against `position` (1-based).
    pub fn timestamp(&self, position: usize) -> Result<Timestamp> {
        parse_age_label(&self.0, position)
    }
}

impl fmt::Display for AgeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AgeLabel {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Extract the epoch seconds from a raw label.
///
/// The label must contain exactly one space separating two tokens; the
/// second must be a base-10 integer.
pub fn parse_age_label(label: &str, position: usize) -> Result<Timestamp> {
    let tokens: Vec<&str> = label.split(' ').collect();
    let [_, epoch] = tokens.as_slice() else {
        return Err(CheckError::MalformedLabel {
            label: label.to_string(),
            position,
        });
    };

    epoch
        .parse::<Timestamp>()
        .map_err(|_| CheckError::NonNumericTimestamp {
            token: epoch.to_string(),
            position,
        })
}
