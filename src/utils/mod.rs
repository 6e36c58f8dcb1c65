//! Utility functions.
//!
//! This module provides:
//! - CSS selector parsing utilities
//! - String trimming/truncation helpers

mod selector;
mod text;

pub use selector::parse_selector_unsafe;
pub use text::{non_empty_trimmed, truncate_chars};
