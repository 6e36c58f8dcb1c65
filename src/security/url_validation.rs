//! URL validation and SSRF protection.
//!
//! This module decides whether a URL may be fetched by the server. It blocks:
//! - Every scheme other than `https`
//! - Literal private/reserved IP hosts (checked without any DNS lookup)
//! - `localhost` names
//! - Hostnames whose DNS answer contains a private/reserved address
//! - Hostnames that fail to resolve in time (fail closed)
//!
//! The same check runs before the first request and before every redirect hop.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use url::{Host, Url};

use crate::dns::{lookup_with_timeout, HostResolver};
use crate::security::ip::is_private_ip;

/// The only scheme the server will fetch.
pub const ALLOWED_SCHEME: &str = "https";

/// Decides whether a URL may be requested.
///
/// The resolver consults a guard before the first request and before each
/// redirect hop.
#[async_trait]
pub trait UrlGuard: Send + Sync {
    async fn is_safe(&self, url: &Url) -> bool;
}

/// Production guard: scheme allow-list, literal-IP classification and a
/// bounded DNS lookup.
#[derive(Clone)]
pub struct SafeUrlValidator {
    resolver: Arc<dyn HostResolver>,
    dns_timeout: Duration,
}

impl SafeUrlValidator {
    pub fn new(resolver: Arc<dyn HostResolver>, dns_timeout: Duration) -> Self {
        Self {
            resolver,
            dns_timeout,
        }
    }
}

#[async_trait]
impl UrlGuard for SafeUrlValidator {
    async fn is_safe(&self, url: &Url) -> bool {
        if url.scheme() != ALLOWED_SCHEME {
            log::warn!("Rejected URL with scheme '{}': {}", url.scheme(), url);
            return false;
        }

        let domain = match url.host() {
            Some(Host::Ipv4(ip)) => return is_public_literal(url, ip.into()),
            Some(Host::Ipv6(ip)) => return is_public_literal(url, ip.into()),
            Some(Host::Domain(domain)) => domain,
            None => {
                log::warn!("Rejected URL without host: {}", url);
                return false;
            }
        };

        if is_localhost_domain(domain) {
            log::warn!("Rejected localhost URL: {}", url);
            return false;
        }

        match lookup_with_timeout(self.resolver.as_ref(), domain, self.dns_timeout).await {
            Ok(addrs) => {
                // Strictest reading: one private answer is enough to reject.
                if let Some(private) = addrs.iter().find(|ip| is_private_ip(**ip)) {
                    log::warn!("Rejected {}: '{}' resolves to {}", url, domain, private);
                    false
                } else {
                    !addrs.is_empty()
                }
            }
            Err(e) => {
                log::info!("Rejected {} (fail closed): {}", url, e);
                false
            }
        }
    }
}

/// Convenience wrapper over a guard for string input.
///
/// Parse errors fail closed.
///
/// # Examples
///
/// ```no_run
/// # async fn demo(guard: &dyn link_metadata::security::UrlGuard) {
/// use link_metadata::security::is_safe_url;
///
/// assert!(!is_safe_url(guard, "http://example.com").await);
/// assert!(!is_safe_url(guard, "file:///etc/passwd").await);
/// assert!(!is_safe_url(guard, "https://127.0.0.1/").await);
/// # }
/// ```
pub async fn is_safe_url(guard: &dyn UrlGuard, url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => guard.is_safe(&parsed).await,
        Err(e) => {
            log::debug!("Rejected unparseable URL '{}': {}", url, e);
            false
        }
    }
}

fn is_public_literal(url: &Url, ip: std::net::IpAddr) -> bool {
    if is_private_ip(ip) {
        log::warn!("Rejected private IP literal {} in {}", ip, url);
        false
    } else {
        true
    }
}

/// Checks if a domain name is a localhost variant.
fn is_localhost_domain(domain: &str) -> bool {
    let domain_lower = domain.to_lowercase();
    matches!(
        domain_lower.as_str(),
        "localhost" | "localhost." | "localhost.localdomain" | "localhost.localdomain."
    ) || domain_lower.ends_with(".localhost")
        || domain_lower.ends_with(".localhost.")
}
