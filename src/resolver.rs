//! Metadata resolution orchestrator.
//!
//! `MetadataResolver::fetch_metadata` never fails: every branch ends in a
//! `Metadata` value. The fallback chain is strictly ordered and stops at the
//! first success:
//!
//! 1. parse the URL
//! 2. safety check (unsafe URLs are never fetched)
//! 3. site-specific extractor (structured API, or unfurl for JS-heavy sites)
//! 4. bounded fetch + generic HTML extraction
//! 5. unfurl service when the fetch fails or the extraction looks weak
//! 6. generic favicon so `favicon_url` is filled whenever a host is known

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use url::Url;

use crate::config::Config;
use crate::error_handling::{InitializationError, Skip};
use crate::favicon::generic_favicon_url;
use crate::fetch::Fetcher;
use crate::initialization::{init_api_client, init_page_client, init_resolver};
use crate::models::Metadata;
use crate::parse::{hostname_title, HtmlExtractor};
use crate::security::{SafeUrlValidator, UrlGuard};
use crate::sites::{lookup_site, try_site_specific, SiteStrategy};
use crate::unfurl::try_unfurl_service;

/// Resolves preview metadata for user-submitted URLs.
///
/// Holds no per-call state, so one instance can serve concurrent calls.
#[derive(Clone)]
pub struct MetadataResolver {
    config: Arc<Config>,
    guard: Arc<dyn UrlGuard>,
    fetcher: Fetcher,
    api_client: reqwest::Client,
    extractor: HtmlExtractor,
}

impl MetadataResolver {
    /// Builds the production resolver: system DNS, `SafeUrlValidator`, and
    /// address-pinned page client.
    ///
    /// # Errors
    ///
    /// Returns an `InitializationError` if the DNS resolver or an HTTP
    /// client cannot be created.
    pub fn new(config: Config) -> Result<Self, InitializationError> {
        let dns = init_resolver()?;
        let guard: Arc<dyn UrlGuard> =
            Arc::new(SafeUrlValidator::new(Arc::clone(&dns), config.dns_timeout));
        let page_client = init_page_client(&config, dns)?;
        let api_client = init_api_client(&config)?;
        Ok(Self::from_parts(config, guard, page_client, api_client))
    }

    /// Assembles a resolver from explicit parts.
    ///
    /// `page_client` must not follow redirects on its own.
    pub fn from_parts(
        config: Config,
        guard: Arc<dyn UrlGuard>,
        page_client: reqwest::Client,
        api_client: reqwest::Client,
    ) -> Self {
        let fetcher = Fetcher::new(page_client, Arc::clone(&guard), config.retry.clone());
        let extractor = HtmlExtractor::new(config.endpoints.favicon_service.clone());
        Self {
            config: Arc::new(config),
            guard,
            fetcher,
            api_client,
            extractor,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolves `url` to `Metadata`, degrading to the raw URL as title.
    pub async fn fetch_metadata(&self, url: &str) -> Metadata {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::debug!("Not a URL ({}): {:?}", e, url);
                return Metadata::minimal(url, None);
            }
        };
        let host = parsed.host_str().unwrap_or_default().to_string();

        if !self.guard.is_safe(&parsed).await {
            log::warn!("Refusing to resolve unsafe URL: {}", url);
            return self.minimal_safe(url, &host);
        }

        match AssertUnwindSafe(self.resolve_safe(url, &parsed, &host))
            .catch_unwind()
            .await
        {
            Ok(metadata) => metadata,
            Err(_) => {
                log::error!("Metadata resolution panicked for {}, trying unfurl", url);
                match try_unfurl_service(&self.api_client, &self.config, url).await {
                    Ok(metadata) => self.finish(metadata, url, &host),
                    Err(_) => self.minimal_safe(url, &host),
                }
            }
        }
    }

    /// Steps after the safety check. Only called with a URL that passed it.
    async fn resolve_safe(&self, url: &str, parsed: &Url, host: &str) -> Metadata {
        let unfurl_attempted = matches!(lookup_site(host), Some(SiteStrategy::UnfurlOnly));

        match try_site_specific(&self.api_client, &self.config, parsed, host).await {
            Ok(metadata) => return self.finish(metadata, url, host),
            Err(Skip::NotApplicable) => {}
            Err(skip) => log::info!("Site-specific lookup for {} skipped: {}", url, skip),
        }

        let (extracted, final_url) = match self.try_page(parsed).await {
            Ok(page) => page,
            Err(skip) => {
                log::info!("Page fetch for {} skipped: {}", url, skip);
                return self.unfurl_or_minimal(url, host, unfurl_attempted).await;
            }
        };

        if self.config.retry_weak_extraction
            && !unfurl_attempted
            && is_weak_extraction(&extracted, parsed, &final_url)
        {
            log::debug!("Weak extraction for {}, asking unfurl service", url);
            match try_unfurl_service(&self.api_client, &self.config, url).await {
                Ok(better) if better.title != url => return self.finish(better, url, host),
                Ok(_) => {}
                Err(skip) => log::debug!("Unfurl for {} skipped: {}", url, skip),
            }
        }

        self.finish(extracted, url, host)
    }

    /// Bounded fetch plus generic extraction. Returns the metadata and the
    /// final (post-redirect) URL it was read from.
    async fn try_page(&self, parsed: &Url) -> Result<(Metadata, Url), Skip> {
        let page = self
            .fetcher
            .fetch_bounded(parsed, &self.config.limits)
            .await
            .inspect_err(|e| log::debug!("Fetch of {} failed: {}", parsed, e.as_str()))?
            .ok_or(Skip::NoPage)?;
        let extracted = self.extractor.extract(&page.html, &page.final_url);
        Ok((extracted, page.final_url))
    }

    async fn unfurl_or_minimal(&self, url: &str, host: &str, unfurl_attempted: bool) -> Metadata {
        if !unfurl_attempted {
            match try_unfurl_service(&self.api_client, &self.config, url).await {
                Ok(metadata) => return self.finish(metadata, url, host),
                Err(skip) => log::info!("Unfurl for {} skipped: {}", url, skip),
            }
        }
        self.minimal_safe(url, host)
    }

    /// Raw URL as title plus the generic favicon.
    fn minimal_safe(&self, url: &str, host: &str) -> Metadata {
        Metadata::minimal(url, self.generic_favicon(host))
    }

    /// Enforces the output invariants: non-empty title, favicon when possible.
    fn finish(&self, mut metadata: Metadata, url: &str, host: &str) -> Metadata {
        if metadata.title.trim().is_empty() {
            metadata.title = url.to_string();
        }
        if metadata.favicon_url.is_none() {
            metadata.favicon_url = self.generic_favicon(host);
        }
        metadata
    }

    fn generic_favicon(&self, host: &str) -> Option<String> {
        generic_favicon_url(&self.config.endpoints.favicon_service, host)
    }
}

/// The title is just a hostname and there is no image.
fn is_weak_extraction(metadata: &Metadata, requested: &Url, final_url: &Url) -> bool {
    metadata.image_url.is_none()
        && (metadata.title == hostname_title(requested) || metadata.title == hostname_title(final_url))
}

/// Resolves `url` with a resolver built from `Config::default()`.
///
/// Each call builds its own clients; hold a [`MetadataResolver`] to reuse
/// them across calls.
pub async fn fetch_metadata(url: &str) -> Metadata {
    match MetadataResolver::new(Config::default()) {
        Ok(resolver) => resolver.fetch_metadata(url).await,
        Err(e) => {
            log::error!("Could not initialize metadata resolver: {}", e);
            let favicon = crate::favicon::generic_favicon_for(
                crate::config::FAVICON_SERVICE_BASE,
                url,
            );
            Metadata::minimal(url, favicon)
        }
    }
}
