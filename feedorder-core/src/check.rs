//! End-to-end order check: navigate, collect, parse, validate.

use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::collector::collect_labels;
use crate::driver::ListingDriver;
use crate::error::{CheckError, Result};
use crate::label::{AgeLabel, Timestamp};
use crate::report::CheckReport;
use crate::validator::validate_order;

pub const DEFAULT_LISTING_URL: &str = "https://news.ycombinator.com/newest";
pub const DEFAULT_LIMIT: usize = 100;

/// CSS selectors and attribute names describing the listing markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSelectors {
    /// Matches one element per entry carrying the age attribute.
    pub entry: String,
    pub age_attribute: String,
    /// Matches the "load more" control.
    pub advance: String,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            entry: "span.age".to_string(),
            age_attribute: "title".to_string(),
            advance: "a.morelink".to_string(),
        }
    }
}

/// Parameters of one run.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub listing_url: String,
    pub limit: usize,
    pub selectors: ListingSelectors,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_string(),
            limit: DEFAULT_LIMIT,
            selectors: ListingSelectors::default(),
        }
    }
}

/// Verifies that a listing is ordered newest to oldest.
///
/// ```no_run
/// # async fn demo<D: feedorder_core::ListingDriver>(driver: &D) -> feedorder_core::Result<()> {
/// use feedorder_core::{CheckOptions, OrderCheck};
///
/// let check = OrderCheck::new(CheckOptions { limit: 30, ..CheckOptions::default() });
/// let report = check.run(driver).await?;
/// assert_eq!(report.entries_checked, 30);
/// # Ok(())
/// # }
/// ```
pub struct OrderCheck {
    options: CheckOptions,
}

impl OrderCheck {
    pub fn new(options: CheckOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CheckOptions {
        &self.options
    }

    /// Run the check against `driver`. Any failure aborts the run.
    pub async fn run<D>(&self, driver: &D) -> Result<CheckReport>
    where
        D: ListingDriver + ?Sized,
    {
        let CheckOptions {
            listing_url,
            limit,
            selectors,
        } = &self.options;
        let limit = *limit;
        if limit == 0 {
            return Err(CheckError::InvalidLimit);
        }

        let started = Instant::now();
        info!(url = %listing_url, limit, "starting order check");

        driver.navigate(listing_url).await?;
        driver.wait_for_settled().await?;

        let collected = collect_labels(driver, selectors, limit).await?;
        if collected.labels.len() != limit {
            return Err(CheckError::CountMismatch {
                expected: limit,
                actual: collected.labels.len(),
            });
        }

        let timestamps = parse_all(&collected.labels)?;
        debug!(count = timestamps.len(), "parsed age labels");
        validate_order(&timestamps)?;

        // Reporting only; the order has already been verified here.
        let final_url = match driver.current_url().await {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(error = %e, "could not read final listing URL");
                None
            }
        };
        let report = CheckReport {
            listing_url: listing_url.clone(),
            limit,
            entries_checked: timestamps.len(),
            pages_visited: collected.pages_visited,
            newest: timestamps.first().copied(),
            oldest: timestamps.last().copied(),
            final_url,
            duration_ms: started.elapsed().as_millis() as u64,
            checked_at: Utc::now(),
        };
        info!(
            entries = report.entries_checked,
            pages = report.pages_visited,
            duration_ms = report.duration_ms,
            "order check passed"
        );
        Ok(report)
    }
}

/// Parse every label, in order, with 1-based positions.
pub fn parse_all(labels: &[AgeLabel]) -> Result<Vec<Timestamp>> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| label.timestamp(i + 1))
        .collect()
}
