//! Configuration constants.
//!
//! This module defines the default timeouts, size limits and upstream endpoints
//! used by the metadata resolver. `Config::default()` is built from these values.

use std::time::Duration;

// Network operation timeouts
/// DNS query timeout in seconds
/// Most lookups complete in well under a second; anything slower is treated as unsafe.
pub const DNS_TIMEOUT_SECS: u64 = 3;
/// Overall budget for the main page fetch (all hops, all retries and the body read)
pub const PAGE_FETCH_TIMEOUT: Duration = Duration::from_secs(10);
/// Budget for a structured site API call (e.g. the Twitter/X status API)
pub const SITE_API_TIMEOUT: Duration = Duration::from_secs(5);
/// Budget for a third-party unfurl service call
pub const UNFURL_TIMEOUT: Duration = Duration::from_secs(5);
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;

// Redirect handling
/// Maximum number of redirect hops to follow
/// Every hop is re-validated before it is requested.
pub const MAX_REDIRECT_HOPS: usize = 5;

// Response and body size limits
/// Maximum number of body bytes read from a page (200KB)
/// The stream is abandoned once the cap is reached.
pub const MAX_RESPONSE_BODY_SIZE: usize = 200 * 1024;

/// Maximum number of bytes read from a JSON API response (256KB)
/// Larger answers are treated as unusable.
pub const MAX_API_RESPONSE_SIZE: usize = 256 * 1024;

// Retry strategy
/// Number of retries after the initial attempt (total attempts = 1 + retries)
pub const RETRY_MAX_RETRIES: usize = 2;
/// Delay before the first retry; doubles on each further retry
pub const RETRY_BASE_DELAY: Duration = Duration::from_secs(1);
/// Cap on a single backoff delay
pub const RETRY_MAX_DELAY: Duration = Duration::from_secs(5);

// Request identity
/// Browser-like User-Agent used for the page fetch.
///
/// Many sites serve a stripped page (or a block page) to unknown agents.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
/// User-Agent used when calling structured APIs that return JSON.
pub const API_USER_AGENT: &str = "link_metadata/0.1";
/// Accept header for the page fetch
pub const HTML_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8";

// Upstream endpoints
/// Base URL of the Twitter/X status API (path of the original URL is appended)
pub const FXTWITTER_API_BASE: &str = "https://api.fxtwitter.com";
/// Base URL of the third-party unfurl service (`?url=` is appended)
pub const MICROLINK_API_BASE: &str = "https://api.microlink.io";
/// Base URL of the favicon-by-domain service
pub const FAVICON_SERVICE_BASE: &str = "https://www.google.com/s2/favicons";
/// Icon size requested from the favicon service
pub const FAVICON_SIZE: u32 = 128;

// Site-specific formatting
/// Number of characters of a tweet body kept in the generated title
pub const TWEET_TITLE_CHARS: usize = 50;

// Demo server
/// Default bind address of the demo HTTP endpoint
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
/// Route of the demo metadata endpoint
pub const DEMO_METADATA_ROUTE: &str = "/api/demo/metadata";
