//! Retry classification and backoff schedule.

use std::time::Duration;

use reqwest::StatusCode;
use tokio_retry::strategy::ExponentialBackoff;

use crate::config::RetryPolicy;

/// Delays to wait before each retry, in order.
///
/// `base_delay`, `2 * base_delay`, `4 * base_delay`, ... each capped at
/// `max_delay`, one entry per allowed retry.
pub fn backoff_schedule(policy: &RetryPolicy) -> impl Iterator<Item = Duration> {
    // ExponentialBackoff yields factor * 2^n ms for from_millis(2).
    let base_ms = u64::try_from(policy.base_delay.as_millis()).unwrap_or(u64::MAX);
    ExponentialBackoff::from_millis(2)
        .factor((base_ms / 2).max(1))
        .max_delay(policy.max_delay)
        .take(policy.max_retries)
}

/// 5xx and 429 are worth retrying against the same URL.
pub fn is_retriable_status(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

/// How a request-level error should be handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Deliberate timeout/cancellation: fall back immediately, never retry
    Cancelled,
    /// Connection reset, refused, DNS hiccup, broken body: retry with backoff
    Transient,
}

pub fn classify_request_error(error: &reqwest::Error) -> ErrorClass {
    if error.is_timeout() {
        ErrorClass::Cancelled
    } else {
        ErrorClass::Transient
    }
}
