//! Error handling.
//!
//! This module provides:
//! - `FetchError` for the bounded page fetch
//! - `Skip`, the "no result" outcome of each fallback stage
//! - `DnsError` for hostname lookups
//! - `InitializationError` for start-up failures
//! - `BookmarkError` for bookmark preparation
//!
//! Nothing here escapes `fetch_metadata`; the orchestrator turns every error into
//! a degraded `Metadata` value.

mod types;

// Re-export public API
pub use types::{BookmarkError, DnsError, FetchError, InitializationError, Skip};
