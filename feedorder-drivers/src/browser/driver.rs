use crate::browser::{pacing::Pacing, page::FeedPage};
use anyhow::{Context, Result};
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use std::time::Duration;
use tracing::info;
use webdriver::capabilities::Capabilities;

/// Connection and timing settings for a WebDriver session.
#[derive(Debug, Clone)]
pub struct DriverSettings {
    /// WebDriver endpoint, e.g. a local Chromedriver.
    pub endpoint: String,
    pub headless: bool,
    /// Upper bound for a page to finish loading.
    pub settle_timeout: Duration,
    pub pacing: Pacing,
    /// Additional Chrome command-line arguments.
    pub browser_args: Vec<String>,
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:9515".to_string(),
            headless: true,
            settle_timeout: Duration::from_secs(10),
            pacing: Pacing::default(),
            browser_args: Vec::new(),
        }
    }
}

/// Build Chrome capabilities for `settings`.
pub fn chrome_capabilities(settings: &DriverSettings) -> Capabilities {
    let mut args = vec![
        "--disable-dev-shm-usage".to_string(),
        "--no-sandbox".to_string(),
        "--window-size=1280,1024".to_string(),
    ];
    if settings.headless {
        args.push("--headless".to_string());
        args.push("--disable-gpu".to_string());
    }
    args.extend(settings.browser_args.iter().cloned());

    let mut caps = Capabilities::new();
    caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
    caps
}

/// Thin wrapper around a `fantoccini` WebDriver client.
pub struct FeedDriver {
    client: Client,
    settings: DriverSettings,
}

impl FeedDriver {
    /// Open a session against a running WebDriver service.
    pub async fn connect(settings: DriverSettings) -> Result<Self> {
        info!(
            target: "browser.session",
            endpoint = %settings.endpoint,
            headless = settings.headless,
            "opening WebDriver session"
        );

        let client = ClientBuilder::native()
            .capabilities(chrome_capabilities(&settings))
            .connect(&settings.endpoint)
            .await
            .with_context(|| format!("failed to open WebDriver session at {}", settings.endpoint))?;

        Ok(Self { client, settings })
    }

    /// Page handle sharing this session.
    pub fn page(&self) -> FeedPage {
        FeedPage::new(
            self.client.clone(),
            self.settings.settle_timeout,
            self.settings.pacing,
        )
    }

    /// Close the underlying browser session.
    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }
}
