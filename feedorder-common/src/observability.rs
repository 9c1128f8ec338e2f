//! Logging for feedorder runs.
//!
//! Each run's events land in a daily file
//! (`<app>.log.<YYYY-MM-DD>`), optionally mirrored to `stderr`. The binary
//! calls [`init_logging`] once after its configuration is final; the core
//! integration tests call it with a scratch directory.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();
static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Environment variable consulted when no explicit log directory is set.
pub const LOG_DIR_ENV: &str = "FEEDORDER_LOG_DIR";

/// Output encoding for structured logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Where and how a check run records its trace.
///
/// The binary builds this from the `logging` section of its configuration;
/// integration tests point `log_dir` at a scratch directory.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Stem of the log file name and of the fallback data directory.
    pub app_name: &'static str,
    /// Directory for the daily files. `None` defers to `FEEDORDER_LOG_DIR`,
    /// then `~/.local/share/<app_name>`.
    pub log_dir: Option<PathBuf>,
    /// Mirror events to `stderr`, so page reads and advances show up live.
    pub emit_stderr: bool,
    pub format: LogFormat,
    /// Directive used when `RUST_LOG` is unset, e.g. `feedorder_core=debug`.
    pub default_filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            app_name: "feedorder",
            log_dir: None,
            emit_stderr: false,
            format: LogFormat::Text,
            default_filter: "info".to_string(),
        }
    }
}

/// Install the process-wide subscriber for a check run.
///
/// Returns the file today's events go to. The daily appender dates its files
/// in UTC, so the returned name does too. A second call installs nothing and
/// returns the path from the first.
pub fn init_logging(config: LogConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = LOG_PATH.get() {
        return Ok(path.clone());
    }

    let resolved_dir = resolve_log_dir(config.app_name, config.log_dir.as_deref());
    std::fs::create_dir_all(&resolved_dir)
        .with_context(|| format!("failed to create log directory: {}", resolved_dir.display()))?;

    let log_filename = format!("{}.log", config.app_name);
    let full_path = daily_log_file(&resolved_dir, &log_filename, Utc::now());

    let appender = rolling::daily(&resolved_dir, &log_filename);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let registry = tracing_subscriber::registry().with(env_filter);
    let installed = match (config.format, config.emit_stderr) {
        (LogFormat::Text, false) => registry
            .with(fmt::layer().with_writer(writer).with_ansi(false))
            .try_init(),
        (LogFormat::Text, true) => registry
            .with(fmt::layer().with_writer(writer).with_ansi(false))
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        (LogFormat::Json, false) => registry
            .with(fmt::layer().json().with_writer(writer))
            .try_init(),
        (LogFormat::Json, true) => registry
            .with(fmt::layer().json().with_writer(writer))
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("tracing setup failed: {e}"))?;

    let _ = LOG_PATH.set(full_path.clone());
    Ok(full_path)
}

/// File `rolling::daily` writes to on the UTC day of `now`.
fn daily_log_file(dir: &Path, log_filename: &str, now: DateTime<Utc>) -> PathBuf {
    dir.join(format!("{log_filename}.{}", now.format("%Y-%m-%d")))
}

fn resolve_log_dir(app_name: &str, explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return expand_home(dir);
    }

    if let Ok(env_dir) = std::env::var(LOG_DIR_ENV) {
        return expand_home(Path::new(&env_dir));
    }

    default_data_dir(app_name)
}

fn expand_home(path: &Path) -> PathBuf {
    if let Some(rest) = path.to_str().and_then(|s| s.strip_prefix("~/")) {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    path.to_path_buf()
}

fn default_data_dir(app_name: &str) -> PathBuf {
    match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(app_name),
        Err(_) => PathBuf::from(".").join(app_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dir_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let resolved = resolve_log_dir("feedorder", Some(tmp.path()));
        assert_eq!(resolved, tmp.path());
    }

    #[test]
    fn non_home_paths_are_untouched() {
        let p = Path::new("/var/log/feedorder");
        assert_eq!(expand_home(p), PathBuf::from("/var/log/feedorder"));
    }

    #[test]
    fn daily_file_is_named_by_utc_date() {
        let late_evening_in_new_york = DateTime::parse_from_rfc3339("2026-03-01T21:30:00-05:00")
            .unwrap()
            .with_timezone(&Utc);
        let path = daily_log_file(Path::new("/logs"), "feedorder.log", late_evening_in_new_york);
        assert_eq!(path, PathBuf::from("/logs/feedorder.log.2026-03-02"));
    }

    #[test]
    fn init_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let config = LogConfig {
            app_name: "feedorder-tests",
            log_dir: Some(tmp.path().to_path_buf()),
            ..LogConfig::default()
        };
        let first = init_logging(config.clone()).unwrap();
        let second = init_logging(config).unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with(tmp.path()));
        assert!(first.exists(), "appender did not create {}", first.display());
    }
}
