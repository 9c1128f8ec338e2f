//! Types and utilities shared across the feedorder crates.
//!
//! This crate is intentionally small so that every other crate in the
//! workspace can depend on it without pulling in the browser stack.
//!
//! - [`observability`]: centralised tracing/logging initialisation
//! - [`OutputFormat`]: how the binary renders a run outcome
//! - [`observability::LogFormat`]: encoding of the log sink
//!
//! # Examples
//!
//! ```rust
//! use feedorder_common::OutputFormat;
//!
//! let format: OutputFormat = "json".parse().unwrap();
//! assert_eq!(format, OutputFormat::Json);
//! assert_eq!(OutputFormat::default(), OutputFormat::Text);
//! ```
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod observability;

/// Preferred rendering of a check outcome on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One human-readable line: `PASS ...` or `FAIL [kind] ...`.
    #[default]
    Text,
    /// A single JSON object per run.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}
