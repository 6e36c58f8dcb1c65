//! HTTP client initialization.
//!
//! Two clients are built: one for page fetches (manual redirects, browser
//! user agent, address pinning) and one for the fixed third-party APIs.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, TCP_CONNECT_TIMEOUT_SECS};
use crate::dns::HostResolver;
use crate::error_handling::InitializationError;
use crate::security::SafeResolver;

/// Initializes the client used for page fetches.
///
/// Creates a `reqwest::Client` configured with:
/// - Redirect following disabled (the fetcher validates and follows each hop)
/// - A `SafeResolver`, so connections to private addresses are refused
/// - The browser-like User-Agent from `config`
/// - A TCP connect timeout
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_page_client(
    config: &Config,
    dns: Arc<dyn HostResolver>,
) -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .dns_resolver(Arc::new(SafeResolver::new(dns, config.dns_timeout)))
        .connect_timeout(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(client)
}

/// Initializes the client for the structured site API and unfurl service.
///
/// Per-request timeouts are set by the callers.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_api_client(config: &Config) -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .connect_timeout(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS))
        .user_agent(config.api_user_agent.clone())
        .build()?;
    Ok(client)
}
