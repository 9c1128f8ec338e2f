//! Command-line surface and the mapping from configuration to the typed
//! settings each crate consumes.

use clap::Parser;
use feedorder_common::observability::LogConfig;
use feedorder_common::OutputFormat;
use feedorder_config::FeedOrderConfig;
use feedorder_core::{CheckOptions, ListingSelectors};
use feedorder_drivers::{DriverSettings, Pacing};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "feedorder", version)]
#[command(about = "Check that a paginated listing is ordered newest to oldest")]
pub struct Args {
    /// Configuration file; skipped when it does not exist
    #[arg(short, long, env = "FEEDORDER_CONFIG", default_value = "feedorder.yaml")]
    pub config: PathBuf,

    /// Number of entries to check
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// First page of the listing
    #[arg(long)]
    pub url: Option<String>,

    /// WebDriver endpoint
    #[arg(long)]
    pub webdriver: Option<String>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Output format (text, json)
    #[arg(long)]
    pub format: Option<OutputFormat>,
}

impl Args {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut FeedOrderConfig) {
        if let Some(limit) = self.limit {
            config.listing.limit = limit;
        }
        if let Some(url) = &self.url {
            config.listing.url = url.clone();
        }
        if let Some(endpoint) = &self.webdriver {
            config.webdriver.endpoint = endpoint.clone();
        }
        if self.headed {
            config.webdriver.headless = false;
        }
        if let Some(format) = self.format {
            config.output = format;
        }
    }
}

pub fn check_options(config: &FeedOrderConfig) -> CheckOptions {
    let listing = &config.listing;
    CheckOptions {
        listing_url: listing.url.clone(),
        limit: listing.limit,
        selectors: ListingSelectors {
            entry: listing.entry_selector.clone(),
            age_attribute: listing.age_attribute.clone(),
            advance: listing.advance_selector.clone(),
        },
    }
}

pub fn driver_settings(config: &FeedOrderConfig) -> DriverSettings {
    let webdriver = &config.webdriver;
    DriverSettings {
        endpoint: webdriver.endpoint.clone(),
        headless: webdriver.headless,
        settle_timeout: Duration::from_millis(webdriver.settle_timeout_ms),
        pacing: Pacing::new(webdriver.pacing.min_ms, webdriver.pacing.max_ms),
        browser_args: webdriver.args.clone(),
    }
}

pub fn log_config(config: &FeedOrderConfig) -> LogConfig {
    LogConfig {
        log_dir: config.logging.dir.clone(),
        emit_stderr: config.logging.stderr,
        format: config.logging.format,
        default_filter: config.logging.filter.clone(),
        ..LogConfig::default()
    }
}
