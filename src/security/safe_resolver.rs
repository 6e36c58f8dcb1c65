//! SSRF-safe DNS resolver for reqwest.
//!
//! Implements `reqwest::dns::Resolve` on top of a `HostResolver` and drops
//! every private/reserved address from the answer. The URL validator checks a
//! name before the request; this resolver re-checks the addresses reqwest is
//! about to connect to, so a DNS-rebinding answer in between cannot reach an
//! internal host.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use reqwest::dns::{Addrs, Name, Resolve, Resolving};

use crate::dns::{lookup_with_timeout, HostResolver};
use crate::security::ip::is_private_ip;

/// A reqwest resolver that rejects private/loopback/link-local IPs.
///
/// If *all* resolved IPs are private, resolution fails and the request never
/// opens a socket.
#[derive(Clone)]
pub struct SafeResolver {
    inner: Arc<dyn HostResolver>,
    timeout: Duration,
}

impl SafeResolver {
    pub fn new(inner: Arc<dyn HostResolver>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

impl Resolve for SafeResolver {
    fn resolve(&self, name: Name) -> Resolving {
        let inner = Arc::clone(&self.inner);
        let timeout = self.timeout;
        Box::pin(async move {
            let host = name.as_str().to_string();
            let addrs = lookup_with_timeout(inner.as_ref(), &host, timeout)
                .await
                .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> { Box::new(e) })?;

            let safe_addrs = public_socket_addrs(addrs);
            if safe_addrs.is_empty() {
                return Err(Box::new(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    format!("SSRF blocked: all resolved IPs for '{host}' are private/reserved"),
                )) as Box<dyn std::error::Error + Send + Sync>);
            }

            let addrs: Addrs = Box::new(safe_addrs.into_iter());
            Ok(addrs)
        })
    }
}

/// Keeps only public addresses. Port 0 is replaced by reqwest with the URL's port.
fn public_socket_addrs(addrs: Vec<std::net::IpAddr>) -> Vec<SocketAddr> {
    addrs
        .into_iter()
        .filter(|ip| !is_private_ip(*ip))
        .map(|ip| SocketAddr::new(ip, 0))
        .collect()
}
