//! DNS resolver initialization.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

use crate::config::DNS_TIMEOUT_SECS;
use crate::dns::{HostResolver, SystemResolver};
use crate::error_handling::InitializationError;

fn resolver_opts() -> ResolverOpts {
    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(DNS_TIMEOUT_SECS);
    // Fail fast; the validator wraps every lookup in its own timeout too
    opts.attempts = 2;
    // No search-domain appending: "intranet" must never become "intranet.corp.local"
    opts.ndots = 0;
    opts
}

/// Initializes the DNS resolver used for safety checks and connections.
///
/// Uses the system configuration (`/etc/resolv.conf`) when it can be read
/// and falls back to the hickory defaults otherwise.
pub fn init_resolver() -> Result<Arc<dyn HostResolver>, InitializationError> {
    let config = match hickory_resolver::system_conf::read_system_conf() {
        Ok((config, _)) => config,
        Err(e) => {
            log::warn!("Could not read system DNS configuration, using defaults: {}", e);
            ResolverConfig::default()
        }
    };
    let resolver = TokioAsyncResolver::tokio(config, resolver_opts());
    Ok(Arc::new(SystemResolver::new(resolver)))
}
