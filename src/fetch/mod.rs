//! Bounded page fetching.
//!
//! `Fetcher::fetch_bounded` performs a GET with:
//! - one overall timeout covering every hop, retry wait and the body read
//! - manual redirects, each target re-validated before it is requested
//! - a hop limit
//! - retries with exponential backoff on 5xx, 429 and network errors
//! - a hard cap on body bytes read

mod body;
mod redirects;
mod request;
mod retry;

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use url::Url;

use crate::config::{FetchLimits, RetryPolicy};
use crate::error_handling::FetchError;
use crate::security::UrlGuard;

pub use body::{read_bounded, read_json_bounded, BoundedBody};
pub use redirects::{is_followable_redirect, location_header, resolve_location};
pub use retry::{backoff_schedule, classify_request_error, is_retriable_status, ErrorClass};

use request::{is_html_content_type, RequestHeaders};

/// A page read within the bounds.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Body text (at most `max_bytes` bytes before decoding)
    pub html: String,
    /// The URL that produced the body, after redirects
    pub final_url: Url,
    /// Redirect hops followed
    pub redirects: usize,
    /// Backoff delays waited, in order
    pub retry_delays: Vec<Duration>,
    /// `true` if the body was cut at the cap
    pub truncated: bool,
}

/// Per-call fetch state.
///
/// `current` is only ever assigned a URL that has passed the guard.
#[derive(Debug)]
pub struct FetchTarget {
    current: Url,
    redirects: usize,
    deadline: Instant,
    retry_delays: Vec<Duration>,
}

impl FetchTarget {
    fn new(start: Url, budget: Duration) -> Self {
        Self {
            current: start,
            redirects: 0,
            deadline: Instant::now() + budget,
            retry_delays: Vec::new(),
        }
    }

    pub fn current(&self) -> &Url {
        &self.current
    }

    pub fn redirects(&self) -> usize {
        self.redirects
    }

    /// Time left of the overall budget.
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }
}

/// Fetches pages under a `UrlGuard`.
#[derive(Clone)]
pub struct Fetcher {
    /// Must be built with `redirect::Policy::none()`
    client: reqwest::Client,
    guard: Arc<dyn UrlGuard>,
    retry: RetryPolicy,
}

impl Fetcher {
    pub fn new(client: reqwest::Client, guard: Arc<dyn UrlGuard>, retry: RetryPolicy) -> Self {
        Self {
            client,
            guard,
            retry,
        }
    }

    /// Fetches `url` within `limits`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(page))` for a 2xx HTML response
    /// - `Ok(None)` for a final non-2xx status (after retries for 5xx/429) or a
    ///   non-HTML content type; the caller falls back
    ///
    /// # Errors
    ///
    /// - `FetchError::UnsafeUrl` if `url` fails the guard (nothing is sent)
    /// - `FetchError::TooManyRedirects` past `limits.max_redirects` hops
    /// - `FetchError::UnsafeRedirect` if a hop target fails the guard; the
    ///   target is never requested
    /// - `FetchError::Network` once transient errors exhaust the retry budget
    /// - `FetchError::Timeout` when `limits.overall_timeout` elapses
    pub async fn fetch_bounded(
        &self,
        url: &Url,
        limits: &FetchLimits,
    ) -> Result<Option<FetchedPage>, FetchError> {
        match tokio::time::timeout(limits.overall_timeout, self.fetch_within(url, limits)).await {
            Ok(result) => result,
            Err(_) => {
                log::info!(
                    "Fetch of {} timed out after {:?}",
                    url,
                    limits.overall_timeout
                );
                Err(FetchError::Timeout)
            }
        }
    }

    async fn fetch_within(
        &self,
        url: &Url,
        limits: &FetchLimits,
    ) -> Result<Option<FetchedPage>, FetchError> {
        if !self.guard.is_safe(url).await {
            return Err(FetchError::UnsafeUrl(url.clone()));
        }
        let mut target = FetchTarget::new(url.clone(), limits.overall_timeout);

        loop {
            let response = self.send_with_retry(&mut target).await?;
            let status = response.status();

            if is_followable_redirect(status) {
                let Some(location) = location_header(response.headers()) else {
                    log::warn!("Redirect {} from {} without Location header", status, target.current);
                    return Ok(None);
                };
                let next = resolve_location(&target.current, location)?;
                drop(response);

                target.redirects += 1;
                if target.redirects > limits.max_redirects {
                    log::warn!(
                        "Too many redirects for {} (max {})",
                        url,
                        limits.max_redirects
                    );
                    return Err(FetchError::TooManyRedirects {
                        max: limits.max_redirects,
                    });
                }
                if !self.guard.is_safe(&next).await {
                    log::warn!("Redirect from {} to unsafe target {}", target.current, next);
                    return Err(FetchError::UnsafeRedirect { target: next });
                }
                log::debug!("Redirect hop {}: {} -> {}", target.redirects, target.current, next);
                target.current = next;
                continue;
            }

            if !status.is_success() {
                log::info!("Fetch of {} returned HTTP {}", target.current, status);
                return Ok(None);
            }

            if !is_html_content_type(response.headers()) {
                log::info!("Skipping {} - non-HTML content type", target.current);
                return Ok(None);
            }

            let body = read_bounded(Box::pin(response.bytes_stream()), limits.max_bytes)
                .await
                .map_err(|e| {
                    if e.is_timeout() {
                        FetchError::Timeout
                    } else {
                        FetchError::Body(e.to_string())
                    }
                })?;
            if body.truncated {
                log::debug!(
                    "Body of {} cut at {} bytes",
                    target.current,
                    limits.max_bytes
                );
            }

            let truncated = body.truncated;
            return Ok(Some(FetchedPage {
                html: body.into_text(),
                final_url: target.current,
                redirects: target.redirects,
                retry_delays: target.retry_delays,
                truncated,
            }));
        }
    }

    /// Sends a GET to `target.current`, retrying the same URL on 5xx/429 and
    /// transient network errors. The last 5xx/429 response is returned as-is
    /// once retries run out.
    async fn send_with_retry(&self, target: &mut FetchTarget) -> Result<reqwest::Response, FetchError> {
        let mut delays = backoff_schedule(&self.retry);
        let mut attempts = 0usize;

        loop {
            attempts += 1;
            let request = RequestHeaders::apply_to_request_builder(
                self.client.get(target.current.clone()),
            );

            let delay = match request.send().await {
                Ok(response) => {
                    if !is_retriable_status(response.status()) {
                        return Ok(response);
                    }
                    match delays.next() {
                        Some(delay) => {
                            log::info!(
                                "HTTP {} from {} (attempt {}), retrying in {:?}",
                                response.status(),
                                target.current,
                                attempts,
                                delay
                            );
                            delay
                        }
                        None => return Ok(response),
                    }
                }
                Err(e) => match (classify_request_error(&e), delays.next()) {
                    (ErrorClass::Cancelled, _) => return Err(FetchError::Timeout),
                    (ErrorClass::Transient, Some(delay)) => {
                        log::info!(
                            "Network error for {} (attempt {}): {}, retrying in {:?}",
                            target.current,
                            attempts,
                            e,
                            delay
                        );
                        delay
                    }
                    (ErrorClass::Transient, None) => {
                        log::warn!("Giving up on {} after {} attempts: {}", target.current, attempts, e);
                        return Err(FetchError::Network {
                            attempts,
                            retry_delays: std::mem::take(&mut target.retry_delays),
                            source: e,
                        });
                    }
                },
            };

            if delay >= target.remaining() {
                log::info!("Backoff for {} exceeds remaining budget", target.current);
                return Err(FetchError::Timeout);
            }
            target.retry_delays.push(delay);
            tokio::time::sleep(delay).await;
        }
    }
}
