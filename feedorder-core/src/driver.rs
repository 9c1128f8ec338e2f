use anyhow::Result;
use async_trait::async_trait;

/// Browser capabilities the check depends on.
///
/// Implementations drive a real browser (see `feedorder-drivers`) or an
/// in-memory fake in tests. Calls are issued strictly one at a time; the
/// check never has two in flight.
#[async_trait]
pub trait ListingDriver: Send + Sync {
    /// Opaque handle to a rendered element.
    type Element: Send + Sync;

    /// Load `url` in the current session.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Wait until the current document has finished loading.
    async fn wait_for_settled(&self) -> Result<()>;

    /// All elements matching a CSS selector, in presentation order.
    async fn query_all(&self, selector: &str) -> Result<Vec<Self::Element>>;

    /// Read an attribute; `None` when the element does not carry it.
    async fn get_attribute(&self, element: &Self::Element, name: &str) -> Result<Option<String>>;

    /// Activate the first element matching `selector` and wait for the next
    /// page to settle. Returns `false` when no such element is rendered.
    async fn advance_page(&self, selector: &str) -> Result<bool>;

    /// Location of the current page, used in diagnostics.
    async fn current_url(&self) -> Result<String>;
}
