//! HTTP redirect handling.
//!
//! Redirects are followed manually (the client has redirects disabled) so each
//! `Location` target can be re-validated before it is requested.

use reqwest::header::{HeaderMap, LOCATION};
use reqwest::StatusCode;
use url::Url;

use crate::error_handling::FetchError;

/// 301, 302, 303, 307 and 308 are followed. Other 3xx codes are final.
pub fn is_followable_redirect(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    )
}

/// Returns the raw `Location` header, if present and valid text.
pub fn location_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Resolves a `Location` value against the URL that produced it.
///
/// Relative paths, protocol-relative and absolute targets are all accepted;
/// the fragment of the current URL is not carried over.
pub fn resolve_location(current: &Url, location: &str) -> Result<Url, FetchError> {
    current
        .join(location)
        .map_err(|_| FetchError::InvalidRedirect {
            location: location.to_string(),
        })
}
