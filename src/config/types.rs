//! Configuration types and CLI options.
//!
//! `Config` is the library-facing configuration (no CLI dependency). `Opt` is the
//! command line of the demo server binary and converts into a `Config`.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::*;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Retry behaviour for transient failures (5xx, 429, connection errors).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: usize,
    /// Delay before the first retry; doubles on every further retry
    pub base_delay: Duration,
    /// Upper bound on any single delay
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: RETRY_MAX_RETRIES,
            base_delay: RETRY_BASE_DELAY,
            max_delay: RETRY_MAX_DELAY,
        }
    }
}

/// Resource bounds for a single page fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchLimits {
    pub max_redirects: usize,
    pub max_bytes: usize,
    /// Covers every hop, every retry wait and the body read combined
    pub overall_timeout: Duration,
}

impl Default for FetchLimits {
    fn default() -> Self {
        Self {
            max_redirects: MAX_REDIRECT_HOPS,
            max_bytes: MAX_RESPONSE_BODY_SIZE,
            overall_timeout: PAGE_FETCH_TIMEOUT,
        }
    }
}

/// Base URLs of every upstream service the resolver talks to.
///
/// Tests point these at local mock servers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub fxtwitter_api: String,
    pub unfurl_api: String,
    pub favicon_service: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            fxtwitter_api: FXTWITTER_API_BASE.to_string(),
            unfurl_api: MICROLINK_API_BASE.to_string(),
            favicon_service: FAVICON_SERVICE_BASE.to_string(),
        }
    }
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use link_metadata::Config;
/// use std::time::Duration;
///
/// let mut config = Config::default();
/// config.limits.max_bytes = 64 * 1024;
/// config.dns_timeout = Duration::from_secs(2);
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Page fetch bounds (redirects, body size, overall timeout)
    pub limits: FetchLimits,

    /// Retry policy for the page fetch
    pub retry: RetryPolicy,

    /// DNS lookup timeout used by the URL safety validator
    pub dns_timeout: Duration,

    /// Timeout for structured site API calls
    pub site_api_timeout: Duration,

    /// Timeout for unfurl service calls
    pub unfurl_timeout: Duration,

    /// User-Agent sent with the page fetch
    pub user_agent: String,

    /// User-Agent sent to JSON APIs
    pub api_user_agent: String,

    /// Upstream service base URLs
    pub endpoints: Endpoints,

    /// Retry a weak generic extraction (title == hostname, no image) through the unfurl service
    pub retry_weak_extraction: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            limits: FetchLimits::default(),
            retry: RetryPolicy::default(),
            dns_timeout: Duration::from_secs(DNS_TIMEOUT_SECS),
            site_api_timeout: SITE_API_TIMEOUT,
            unfurl_timeout: UNFURL_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            api_user_agent: API_USER_AGENT.to_string(),
            endpoints: Endpoints::default(),
            retry_weak_extraction: true,
        }
    }
}

/// Command-line options for the demo server binary.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "link_metadata",
    about = "Serve the link metadata demo endpoint (POST /api/demo/metadata)"
)]
pub struct Opt {
    /// Address to bind the demo server to
    #[arg(long, default_value = DEFAULT_BIND_ADDR)]
    pub bind: String,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,

    /// Overall page fetch timeout in seconds
    #[arg(long, default_value_t = PAGE_FETCH_TIMEOUT.as_secs())]
    pub timeout_seconds: u64,

    /// Maximum number of body bytes read from a page
    #[arg(long, default_value_t = MAX_RESPONSE_BODY_SIZE)]
    pub max_body_bytes: usize,
}

impl From<&Opt> for Config {
    fn from(opt: &Opt) -> Self {
        let mut config = Config::default();
        config.limits.overall_timeout = Duration::from_secs(opt.timeout_seconds);
        config.limits.max_bytes = opt.max_body_bytes;
        config
    }
}
