//! Traversal and verification engine for chronologically sorted listings.
//!
//! A run walks a paginated listing through a [`driver::ListingDriver`],
//! accumulates a bounded number of age labels, turns each label into an
//! epoch timestamp and checks that the sequence never increases.
//!
//! - [`driver`]: the narrow capability interface a browser backend implements
//! - [`label`]: age label parsing
//! - [`collector`]: bounded accumulation across pages
//! - [`validator`]: the non-increasing order rule
//! - [`check`]: the end-to-end orchestration
//! - [`error`]: the failure taxonomy shared by all of the above
//!
//! # Examples
//!
//! ```rust
//! use feedorder_core::{label::parse_age_label, validator::validate_order};
//!
//! let stamps: Vec<i64> = ["2025-03-20T15:06:24 1742483184", "2025-03-20T15:01:10 1742482870"]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, raw)| parse_age_label(raw, i + 1))
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert!(validate_order(&stamps).is_ok());
//! ```

pub mod check;
pub mod collector;
pub mod driver;
pub mod error;
pub mod label;
pub mod report;
pub mod validator;

pub use check::{CheckOptions, ListingSelectors, OrderCheck};
pub use driver::ListingDriver;
pub use error::{CheckError, Result};
pub use label::{AgeLabel, Timestamp};
pub use report::CheckReport;
pub use validator::ViolationReport;
