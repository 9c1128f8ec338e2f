//! Bounded accumulation of age labels across listing pages.
//!
//! [`page_batches`] is a lazy stream: each item is the label batch of one
//! page, and the page advance that produces the next batch only runs when
//! that batch is polled. [`collect_labels`] stops polling once it holds
//! `limit` labels, so no page beyond the last one needed is ever requested.

use futures::{Stream, TryStreamExt};
use tracing::debug;

use crate::check::ListingSelectors;
use crate::driver::ListingDriver;
use crate::error::{CheckError, Result};
use crate::label::AgeLabel;

/// Labels gathered for one run.
#[derive(Debug, Clone)]
pub struct Collected {
    /// Exactly `limit` labels, in presentation order.
    pub labels: Vec<AgeLabel>,
    /// Pages read, counting the first.
    pub pages_visited: usize,
}

/// Stream of per-page label batches, starting at the current page.
///
/// Yields an error and ends when an entry lacks the age attribute, when the
/// advance control is missing, or when the driver fails. `limit` is only
/// used to describe exhaustion.
pub fn page_batches<'a, D>(
    driver: &'a D,
    selectors: &'a ListingSelectors,
    limit: usize,
) -> impl Stream<Item = Result<Vec<AgeLabel>>> + 'a
where
    D: ListingDriver + ?Sized,
{
    async_stream::stream! {
        let mut collected = 0usize;
        let mut page = 1usize;
        loop {
            let batch = match read_page(driver, selectors, collected).await {
                Ok(batch) => batch,
                Err(e) => {
                    yield Err(e);
                    return;
                }
            };
            collected += batch.len();
            debug!(page, batch = batch.len(), collected, "read listing page");
            yield Ok(batch);

            match driver.advance_page(&selectors.advance).await {
                Ok(true) => page += 1,
                Ok(false) => {
                    let error = match driver.current_url().await {
                        Ok(url) => CheckError::PaginationExhausted { url, collected, limit },
                        Err(e) => CheckError::Driver(e),
                    };
                    yield Err(error);
                    return;
                }
                Err(e) => {
                    yield Err(CheckError::Driver(e));
                    return;
                }
            }
        }
    }
}

/// Read the age attribute of every entry on the current page.
///
/// `offset` is the number of labels collected before this page, so that
/// reported positions are global across pages.
async fn read_page<D>(driver: &D, selectors: &ListingSelectors, offset: usize) -> Result<Vec<AgeLabel>>
where
    D: ListingDriver + ?Sized,
{
    let entries = driver.query_all(&selectors.entry).await?;
    let mut labels = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        match driver.get_attribute(entry, &selectors.age_attribute).await? {
            Some(raw) => labels.push(AgeLabel::new(raw)),
            None => {
                return Err(CheckError::MissingAttribute {
                    attribute: selectors.age_attribute.clone(),
                    position: offset + i + 1,
                    url: driver.current_url().await?,
                });
            }
        }
    }
    Ok(labels)
}

/// Gather exactly `limit` labels, advancing pages as needed.
///
/// A page that overshoots `limit` is truncated rather than re-queried.
pub async fn collect_labels<D>(
    driver: &D,
    selectors: &ListingSelectors,
    limit: usize,
) -> Result<Collected>
where
    D: ListingDriver + ?Sized,
{
    let batches = page_batches(driver, selectors, limit);
    futures::pin_mut!(batches);

    let mut labels = Vec::with_capacity(limit);
    let mut pages_visited = 0;
    while labels.len() < limit {
        let Some(batch) = batches.try_next().await? else {
            break;
        };
        pages_visited += 1;
        labels.extend(batch);
    }
    labels.truncate(limit);

    Ok(Collected {
        labels,
        pages_visited,
    })
}
