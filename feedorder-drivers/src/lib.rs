//! WebDriver backend for the listing order check.
//!
//! This crate implements [`feedorder_core::ListingDriver`] on top of a
//! `fantoccini` session.
//!
//! - [`browser::driver::FeedDriver`]: WebDriver session wrapper
//! - [`browser::page::FeedPage`]: the page handle the check drives
//! - [`browser::pacing::Pacing`]: randomised delay before each page advance
pub mod browser;

pub use browser::driver::{DriverSettings, FeedDriver};
pub use browser::pacing::Pacing;
pub use browser::page::{FeedElement, FeedPage};
