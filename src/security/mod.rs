//! SSRF defences.
//!
//! - `ip`: pure classification of private/reserved addresses
//! - `url_validation`: the pre-fetch and per-hop URL safety check
//! - `safe_resolver`: connection-time address filtering for reqwest
//!
//! A URL that fails any of these is never requested.

mod ip;
mod safe_resolver;
mod url_validation;

pub use ip::{is_private_address, is_private_ip};
pub use safe_resolver::SafeResolver;
pub use url_validation::{is_safe_url, SafeUrlValidator, UrlGuard, ALLOWED_SCHEME};
