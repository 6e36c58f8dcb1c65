//! link_metadata library: SSRF-safe link preview resolution
//!
//! Given an arbitrary user-submitted URL, this library safely fetches the page
//! and extracts a title, description, preview image and favicon. The server
//! cannot be turned against internal hosts (every URL and every redirect hop is
//! validated, and connections to private addresses are refused), slow or
//! hostile origins are bounded in time and bytes, and failures degrade through
//! a fixed fallback chain instead of surfacing as errors.
//!
//! # Example
//!
//! ```no_run
//! use link_metadata::{Config, MetadataResolver};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = MetadataResolver::new(Config::default())?;
//! let metadata = resolver.fetch_metadata("https://www.rust-lang.org/").await;
//! println!("{} ({:?})", metadata.title, metadata.favicon_url);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod bookmark;
pub mod config;
pub mod dns;
pub mod error_handling;
pub mod favicon;
pub mod fetch;
pub mod initialization;
mod models;
pub mod parse;
mod resolver;
pub mod security;
pub mod server;
pub mod sites;
pub mod unfurl;
mod utils;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{FetchError, Skip};
pub use models::Metadata;
pub use resolver::{fetch_metadata, MetadataResolver};
