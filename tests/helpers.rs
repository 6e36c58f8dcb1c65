// Shared test helpers: a loopback-friendly URL guard, a resolver wired to
// local mock servers, and a tiny axum server launcher.
//
// The production validator only admits public https hosts, so tests swap in
// `LoopbackGuard`, which admits the loopback mock servers (`127.0.0.1` or
// `[::1]`, depending on how `localhost` resolves) and still rejects everything
// the tests use as an "internal" target.

#![allow(dead_code)] // Each test binary uses a different subset

use std::net::IpAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use httptest::Server;
use tokio::net::TcpListener;
use url::{form_urlencoded, Host, Url};

use link_metadata::config::{Config, RetryPolicy};
use link_metadata::dns::HostResolver;
use link_metadata::error_handling::DnsError;
use link_metadata::fetch::Fetcher;
use link_metadata::initialization::{init_api_client, init_page_client};
use link_metadata::security::UrlGuard;
use link_metadata::MetadataResolver;

/// Favicon service base used by the tests, so expected URLs are stable.
pub const TEST_FAVICON_SERVICE: &str = "https://favicons.test/s2/favicons";

/// Admits loopback IPs (any scheme, except paths under `/internal`) and an
/// explicit list of hostnames; rejects everything else. Records each check.
#[derive(Default)]
pub struct LoopbackGuard {
    allowed_hosts: Vec<String>,
    checked: Mutex<Vec<String>>,
}

impl LoopbackGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allowing(hosts: &[&str]) -> Self {
        Self {
            allowed_hosts: hosts.iter().map(|h| h.to_string()).collect(),
            checked: Mutex::new(Vec::new()),
        }
    }

    pub fn checked(&self) -> Vec<String> {
        self.checked.lock().unwrap().clone()
    }
}

#[async_trait]
impl UrlGuard for LoopbackGuard {
    async fn is_safe(&self, url: &Url) -> bool {
        self.checked.lock().unwrap().push(url.to_string());
        let host = url.host_str().unwrap_or_default();
        if self.allowed_hosts.iter().any(|h| h == host) {
            return true;
        }
        let loopback = match url.host() {
            Some(Host::Ipv4(ip)) => ip.is_loopback(),
            Some(Host::Ipv6(ip)) => ip.is_loopback(),
            _ => false,
        };
        loopback && !url.path().starts_with("/internal")
    }
}

/// DNS that knows no names; the tests only connect to IP literals.
pub struct NoDns;

#[async_trait]
impl HostResolver for NoDns {
    async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, DnsError> {
        Err(DnsError::NoAddresses {
            host: host.to_string(),
        })
    }
}

/// Default config with short retry delays and a 3 s fetch budget.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.retry = RetryPolicy {
        max_retries: 2,
        base_delay: Duration::from_millis(10),
        max_delay: Duration::from_millis(40),
    };
    config.limits.overall_timeout = Duration::from_secs(3);
    config.endpoints.favicon_service = TEST_FAVICON_SERVICE.to_string();
    // Anything not overridden by a test must never hit the network
    config.endpoints.unfurl_api = "http://127.0.0.1:9/unfurl".to_string();
    config.endpoints.fxtwitter_api = "http://127.0.0.1:9".to_string();
    config.site_api_timeout = Duration::from_millis(500);
    config.unfurl_timeout = Duration::from_millis(500);
    config
}

/// A fetcher built with the production page client.
pub fn test_fetcher(config: &Config, guard: Arc<dyn UrlGuard>) -> Fetcher {
    let client = init_page_client(config, Arc::new(NoDns)).unwrap();
    Fetcher::new(client, guard, config.retry.clone())
}

/// A resolver built with the production clients and `guard`.
pub fn test_resolver(config: Config, guard: Arc<dyn UrlGuard>) -> MetadataResolver {
    let page_client = init_page_client(&config, Arc::new(NoDns)).unwrap();
    let api_client = init_api_client(&config).unwrap();
    MetadataResolver::from_parts(config, guard, page_client, api_client)
}

/// Serves `app` on an ephemeral loopback port, returning `http://127.0.0.1:{port}`.
pub async fn start_app(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Host part of `server`'s URLs as `Url::host_str` reports it
/// (`127.0.0.1` or `[::1]`).
pub fn server_host(server: &Server) -> String {
    let url = Url::parse(&server.url_str("/")).unwrap();
    url.host_str().unwrap().to_string()
}

/// The generic favicon the tests expect for `host` (brackets stripped,
/// query-encoded).
pub fn generic_icon(host: &str) -> String {
    let bare = host.trim_start_matches('[').trim_end_matches(']');
    let domain: String = form_urlencoded::byte_serialize(bare.as_bytes()).collect();
    format!("{}?domain={}&sz=128", TEST_FAVICON_SERVICE, domain)
}
