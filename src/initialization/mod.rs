//! Resource setup for the resolver and the demo server.
//!
//! This module provides functions to initialize shared resources:
//! - Logger
//! - DNS resolver
//! - HTTP clients (page fetch and third-party APIs)
//!
//! All initialization functions return `InitializationError` on failure.

mod client;
mod logger;
mod resolver;

// Re-export public API
pub use client::{init_api_client, init_page_client};
pub use logger::init_logger_with;
pub use resolver::init_resolver;
