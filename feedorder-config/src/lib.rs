//! Loader for feedorder configuration with YAML + environment overlays.
//!
//! Sources are merged in this order, later ones winning:
//!
//! 1. YAML files and inline snippets, in the order they were attached
//! 2. `FEEDORDER__`-prefixed environment variables, `__` separating
//!    nesting levels (`FEEDORDER__LISTING__LIMIT=50`)
//!
//! `${VAR}` placeholders in string values are then expanded from the
//! process environment. Every field has a default, so an empty document
//! is a valid configuration.
use config::{Config, ConfigError, Environment, File};
use feedorder_common::observability::LogFormat;
use feedorder_common::OutputFormat;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;
const ENV_PREFIX: &str = "FEEDORDER";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FeedOrderConfig {
    pub version: Option<String>,
    pub listing: ListingConfig,
    pub webdriver: WebDriverConfig,
    pub logging: LoggingConfig,
    pub output: OutputFormat,
}

/// What to check and how the listing is marked up.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    pub url: String,
    pub limit: usize,
    pub entry_selector: String,
    pub age_attribute: String,
    pub advance_selector: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            url: "https://news.ycombinator.com/newest".into(),
            limit: 100,
            entry_selector: "span.age".into(),
            age_attribute: "title".into(),
            advance_selector: "a.morelink".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebDriverConfig {
    pub endpoint: String,
    pub headless: bool,
    pub settle_timeout_ms: u64,
    pub pacing: PacingConfig,
    pub args: Vec<String>,
}

impl Default for WebDriverConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:9515".into(),
            headless: true,
            settle_timeout_ms: 10_000,
            pacing: PacingConfig::default(),
            args: Vec::new(),
        }
    }
}

/// Random delay before each page advance; `max_ms: 0` disables it.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub min_ms: u64,
    pub max_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset.
    pub filter: String,
    pub format: LogFormat,
    pub dir: Option<PathBuf>,
    pub stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".into(),
            format: LogFormat::Text,
            dir: None,
            stderr: true,
        }
    }
}

/// A configuration that parsed but cannot drive a run.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum InvalidConfig {
    #[error("listing.limit must be a positive integer")]
    ZeroLimit,

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("{field} is not a valid URL: {value}")]
    BadUrl { field: &'static str, value: String },

    #[error("webdriver.pacing.min_ms ({min_ms}) exceeds max_ms ({max_ms})")]
    PacingBounds { min_ms: u64, max_ms: u64 },

    #[error("webdriver.settle_timeout_ms must be positive")]
    ZeroSettleTimeout,
}

impl FeedOrderConfig {
    /// Semantic checks the deserializer cannot express.
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        let listing = &self.listing;
        if listing.limit == 0 {
            return Err(InvalidConfig::ZeroLimit);
        }
        for (field, value) in [
            ("listing.entry_selector", &listing.entry_selector),
            ("listing.age_attribute", &listing.age_attribute),
            ("listing.advance_selector", &listing.advance_selector),
        ] {
            if value.trim().is_empty() {
                return Err(InvalidConfig::EmptyField { field });
            }
        }
        for (field, value) in [
            ("listing.url", &listing.url),
            ("webdriver.endpoint", &self.webdriver.endpoint),
        ] {
            if url::Url::parse(value).is_err() {
                return Err(InvalidConfig::BadUrl {
                    field,
                    value: value.clone(),
                });
            }
        }
        let pacing = self.webdriver.pacing;
        if pacing.min_ms > pacing.max_ms {
            return Err(InvalidConfig::PacingBounds {
                min_ms: pacing.min_ms,
                max_ms: pacing.max_ms,
            });
        }
        if self.webdriver.settle_timeout_ms == 0 {
            return Err(InvalidConfig::ZeroSettleTimeout);
        }
        Ok(())
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hiding the `config` crate wiring.
pub struct FeedOrderConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for FeedOrderConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedOrderConfigLoader {
    /// ```
    /// use feedorder_config::FeedOrderConfigLoader;
    ///
    /// let config = FeedOrderConfigLoader::new()
    ///     .with_yaml_str("version: '1'\nlisting:\n  limit: 30")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.version.as_deref(), Some("1"));
    /// assert_eq!(config.listing.limit, 30);
    /// assert_eq!(config.listing.entry_selector, "span.age");
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a YAML/TOML/JSON file that must exist; format is inferred by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that is skipped when absent.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Merge an inline YAML snippet.
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Merge all sources, expand `${VAR}` placeholders, deserialize and
    /// validate.
    ///
    /// ```
    /// use feedorder_config::FeedOrderConfigLoader;
    ///
    /// temp_env::with_var("LISTING_HOST", Some("staging.example.test"), || {
    ///     let config = FeedOrderConfigLoader::new()
    ///         .with_yaml_str("listing:\n  url: https://${LISTING_HOST}/newest")
    ///         .load()
    ///         .expect("valid configuration");
    ///     assert_eq!(config.listing.url, "https://staging.example.test/newest");
    /// });
    /// ```
    pub fn load(self) -> Result<FeedOrderConfig, ConfigError> {
        let typed = self.merge()?;
        typed
            .validate()
            .map_err(|e| ConfigError::Message(e.to_string()))?;
        Ok(typed)
    }

    /// Like [`load`](Self::load) but skips [`FeedOrderConfig::validate`].
    ///
    /// For callers that layer further overrides (command-line flags) on the
    /// result; they must validate once those are applied.
    ///
    /// ```
    /// use feedorder_config::FeedOrderConfigLoader;
    ///
    /// let mut config = FeedOrderConfigLoader::new()
    ///     .with_yaml_str("listing:\n  limit: 0")
    ///     .merge()
    ///     .expect("merged configuration");
    /// assert!(config.validate().is_err());
    ///
    /// config.listing.limit = 30;
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn merge(self) -> Result<FeedOrderConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))
    }
}
