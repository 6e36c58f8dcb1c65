//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, upstream endpoints)
//! - The library `Config` and its parts
//! - CLI option types for the demo server

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, Endpoints, FetchLimits, LogFormat, LogLevel, Opt, RetryPolicy};
