//! Error type definitions.
//!
//! This module defines the errors produced by the fetch path, the `Skip` outcome
//! every fallback stage returns, and initialization failures.

use std::time::Duration;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;
use url::Url;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Errors from a hostname lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DnsError {
    #[error("DNS lookup for '{host}' failed: {message}")]
    Lookup { host: String, message: String },

    #[error("DNS lookup for '{host}' returned no addresses")]
    NoAddresses { host: String },

    #[error("DNS lookup for '{host}' timed out")]
    Timeout { host: String },
}

/// Errors from the bounded page fetch.
///
/// None of these are retried except `Network`, which is only returned after the
/// retry budget is spent.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The start URL failed the safety validator; no request was issued.
    #[error("refusing to fetch unsafe URL: {0}")]
    UnsafeUrl(Url),

    /// The redirect chain is longer than the configured maximum.
    #[error("too many redirects (max {max})")]
    TooManyRedirects { max: usize },

    /// A `Location` target failed the safety validator; it was never requested.
    #[error("redirect to unsafe target: {target}")]
    UnsafeRedirect { target: Url },

    /// A `Location` header that cannot be resolved against the current URL.
    #[error("invalid redirect location: {location}")]
    InvalidRedirect { location: String },

    /// Transient network failure that persisted through every retry.
    #[error("network error after {attempts} attempt(s): {source}")]
    Network {
        attempts: usize,
        /// Backoff delays waited between the attempts
        retry_delays: Vec<Duration>,
        #[source]
        source: ReqwestError,
    },

    /// The overall fetch budget elapsed. Never retried.
    #[error("fetch timed out")]
    Timeout,

    /// The body stream failed part-way.
    #[error("failed to read response body: {0}")]
    Body(String),
}

impl FetchError {
    /// Short machine-friendly label for log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchError::UnsafeUrl(_) => "unsafe_url",
            FetchError::TooManyRedirects { .. } => "too_many_redirects",
            FetchError::UnsafeRedirect { .. } => "unsafe_redirect",
            FetchError::InvalidRedirect { .. } => "invalid_redirect",
            FetchError::Network { .. } => "network",
            FetchError::Timeout => "timeout",
            FetchError::Body(_) => "body",
        }
    }
}

/// Why a fallback stage produced no `Metadata`.
///
/// Every stage of the resolution chain returns `Result<Metadata, Skip>`; the
/// orchestrator moves to the next stage on any `Err`.
#[derive(Error, Debug)]
pub enum Skip {
    /// The stage does not handle this URL (e.g. hostname not in the site table).
    #[error("stage not applicable")]
    NotApplicable,

    /// The page answered, but not with usable HTML (final non-2xx status or a
    /// non-HTML content type).
    #[error("no usable page")]
    NoPage,

    /// The page fetch failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Upstream answered with a non-success HTTP status.
    #[error("upstream returned HTTP {0}")]
    Status(u16),

    /// Upstream answered successfully but the payload was unusable.
    #[error("unusable upstream response: {0}")]
    Upstream(String),

    /// The stage's own timeout elapsed.
    #[error("stage timed out")]
    Timeout,
}

impl From<ReqwestError> for Skip {
    fn from(e: ReqwestError) -> Self {
        if e.is_timeout() {
            Skip::Timeout
        } else if let Some(status) = e.status() {
            Skip::Status(status.as_u16())
        } else {
            Skip::Upstream(e.to_string())
        }
    }
}

/// Why a bookmark could not be prepared.
#[derive(Error, Debug)]
pub enum BookmarkError<E> {
    #[error("Bookmark already exists in this workspace")]
    AlreadyExists,

    #[error("duplicate check failed: {0}")]
    DuplicateCheck(E),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_labels() {
        assert_eq!(FetchError::Timeout.as_str(), "timeout");
        assert_eq!(
            FetchError::TooManyRedirects { max: 5 }.as_str(),
            "too_many_redirects"
        );
        let target = Url::parse("https://169.254.169.254/").unwrap();
        assert_eq!(
            FetchError::UnsafeRedirect { target }.as_str(),
            "unsafe_redirect"
        );
    }

    #[test]
    fn test_fetch_error_display() {
        let target = Url::parse("https://169.254.169.254/latest").unwrap();
        let msg = FetchError::UnsafeRedirect { target }.to_string();
        assert!(msg.contains("169.254.169.254"));
        assert_eq!(
            FetchError::TooManyRedirects { max: 5 }.to_string(),
            "too many redirects (max 5)"
        );
    }

    #[test]
    fn test_skip_wraps_fetch_error() {
        let skip: Skip = FetchError::Timeout.into();
        assert!(matches!(skip, Skip::Fetch(FetchError::Timeout)));
        assert_eq!(skip.to_string(), "fetch timed out");
        assert_eq!(Skip::NoPage.to_string(), "no usable page");
    }

    #[test]
    fn test_dns_error_display() {
        let err = DnsError::Timeout {
            host: "slow.example".to_string(),
        };
        assert_eq!(err.to_string(), "DNS lookup for 'slow.example' timed out");
    }
}
