use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::label::Timestamp;

/// Summary of a passing run.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub listing_url: String,
    pub limit: usize,
    pub entries_checked: usize,
    pub pages_visited: usize,
    /// Timestamp of the first entry checked.
    pub newest: Option<Timestamp>,
    /// Timestamp of the last entry checked.
    pub oldest: Option<Timestamp>,
    /// Page the browser ended on, if the driver could still report it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_url: Option<String>,
    pub duration_ms: u64,
    pub checked_at: DateTime<Utc>,
}

impl CheckReport {
    /// Span between newest and oldest entry, in seconds.
    pub fn span_secs(&self) -> Option<i64> {
        Some(self.newest? - self.oldest?)
    }

    /// Human rendering of an epoch value, `None` when out of range.
    pub fn render_timestamp(ts: Timestamp) -> Option<String> {
        DateTime::<Utc>::from_timestamp(ts, 0).map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
    }

    /// One-line summary used by the text output.
    pub fn summary(&self) -> String {
        let bound = |ts: Option<Timestamp>| {
            ts.and_then(Self::render_timestamp)
                .unwrap_or_else(|| "n/a".to_string())
        };
        format!(
            "{} entries across {} page(s) of {} are newest to oldest ({} .. {}, {} ms)",
            self.entries_checked,
            self.pages_visited,
            self.listing_url,
            bound(self.newest),
            bound(self.oldest),
            self.duration_ms,
        )
    }
}
