//! Hostname resolution.
//!
//! `HostResolver` is the seam the URL safety validator resolves names through.
//! Production uses `SystemResolver` (hickory); tests substitute a fixed table.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;

use crate::error_handling::DnsError;

/// Resolves a hostname to its addresses.
#[async_trait]
pub trait HostResolver: Send + Sync {
    async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, DnsError>;
}

/// Resolver backed by hickory's tokio resolver.
#[derive(Clone)]
pub struct SystemResolver {
    inner: TokioAsyncResolver,
}

impl SystemResolver {
    pub fn new(inner: TokioAsyncResolver) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl HostResolver for SystemResolver {
    async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, DnsError> {
        let response = self
            .inner
            .lookup_ip(host)
            .await
            .map_err(|e| DnsError::Lookup {
                host: host.to_string(),
                message: e.to_string(),
            })?;
        let addrs: Vec<IpAddr> = response.iter().collect();
        if addrs.is_empty() {
            return Err(DnsError::NoAddresses {
                host: host.to_string(),
            });
        }
        Ok(addrs)
    }
}

/// Runs a lookup under `timeout`.
///
/// An elapsed timer is reported as `DnsError::Timeout`; the pending lookup is
/// dropped.
pub async fn lookup_with_timeout(
    resolver: &dyn HostResolver,
    host: &str,
    timeout: Duration,
) -> Result<Vec<IpAddr>, DnsError> {
    match tokio::time::timeout(timeout, resolver.lookup(host)).await {
        Ok(result) => result,
        Err(_) => Err(DnsError::Timeout {
            host: host.to_string(),
        }),
    }
}
