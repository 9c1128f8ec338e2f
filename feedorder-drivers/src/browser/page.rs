use crate::browser::pacing::Pacing;
use anyhow::{bail, Result};
use async_trait::async_trait;
use fantoccini::{elements::Element, Client, Locator};
use feedorder_core::ListingDriver;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, info};

const SETTLE_POLL: Duration = Duration::from_millis(100);

/// Marks the current document so a replacement can be told apart from it.
const MARK_DOCUMENT: &str = "window.__feedorderStale = true;";
const IS_REPLACED_AND_READY: &str =
    "return window.__feedorderStale !== true && document.readyState === 'complete';";
const IS_READY: &str = "return document.readyState === 'complete';";

/// Page handle driven by the order check.
pub struct FeedPage {
    pub(crate) client: Client,
    pub(crate) settle_timeout: Duration,
    pub(crate) pacing: Pacing,
}

impl FeedPage {
    /// Construct a page wrapper around an existing WebDriver client.
    pub fn new(client: Client, settle_timeout: Duration, pacing: Pacing) -> Self {
        Self {
            client,
            settle_timeout,
            pacing,
        }
    }

    /// Poll `script` until it returns `true` or the settle timeout elapses.
    async fn poll_until(&self, script: &str, what: &str) -> Result<()> {
        let deadline = Instant::now() + self.settle_timeout;
        loop {
            let ready = self.client.execute(script, vec![]).await?;
            if ready.as_bool() == Some(true) {
                return Ok(());
            }
            if Instant::now() >= deadline {
                bail!(
                    "timed out after {} ms waiting for {what}",
                    self.settle_timeout.as_millis()
                );
            }
            sleep(SETTLE_POLL).await;
        }
    }
}

#[async_trait]
impl ListingDriver for FeedPage {
    type Element = FeedElement;

    async fn navigate(&self, url: &str) -> Result<()> {
        info!(target: "browser.page", %url, "navigating");
        self.client.goto(url).await?;
        Ok(())
    }

    async fn wait_for_settled(&self) -> Result<()> {
        self.poll_until(IS_READY, "document load").await
    }

    async fn query_all(&self, selector: &str) -> Result<Vec<FeedElement>> {
        let elements = self.client.find_all(Locator::Css(selector)).await?;
        Ok(elements.into_iter().map(FeedElement::new).collect())
    }

    async fn get_attribute(&self, element: &FeedElement, name: &str) -> Result<Option<String>> {
        element.get_attribute(name).await
    }

    async fn advance_page(&self, selector: &str) -> Result<bool> {
        let controls = self.client.find_all(Locator::Css(selector)).await?;
        let Some(control) = controls.into_iter().next() else {
            debug!(target: "browser.page", %selector, "no advance control rendered");
            return Ok(false);
        };

        self.pacing.pause().await;
        self.client.execute(MARK_DOCUMENT, vec![]).await?;
        control.click().await?;
        self.poll_until(IS_REPLACED_AND_READY, "next page").await?;
        Ok(true)
    }

    async fn current_url(&self) -> Result<String> {
        self.client
            .current_url()
            .await
            .map(|url| url.to_string())
            .map_err(anyhow::Error::from)
    }
}

/// Wrapper for a rendered listing element.
#[derive(Clone)]
pub struct FeedElement {
    pub element: Element,
}

impl FeedElement {
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    /// Read an attribute value.
    pub async fn get_attribute(&self, attribute: &str) -> Result<Option<String>> {
        self.element
            .attr(attribute)
            .await
            .map_err(anyhow::Error::from)
    }
}
