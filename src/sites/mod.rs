//! Site-specific extractors.
//!
//! A static hostname-suffix table picks a strategy for platforms the
//! generic scrape handles badly. Every failure is a [`Skip`] so the
//! orchestrator can continue with the generic path.

mod twitter;

use url::Url;

use crate::config::Config;
use crate::error_handling::Skip;
use crate::models::Metadata;
use crate::unfurl::try_unfurl_service;

/// Platforms with a structured metadata API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Twitter/X via the fxtwitter API
    Twitter,
}

/// How a matched site is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteStrategy {
    /// Call the platform's structured API
    StructuredApi(Platform),
    /// No reliable direct scrape: go straight to the unfurl service
    UnfurlOnly,
}

/// One row of [`SITE_TABLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteRule {
    /// Registrable domain; matches itself and any subdomain
    pub suffix: &'static str,
    /// Strategy for matching hosts
    pub strategy: SiteStrategy,
}

/// Hostname-suffix dispatch table, checked in order.
pub const SITE_TABLE: &[SiteRule] = &[
    SiteRule {
        suffix: "twitter.com",
        strategy: SiteStrategy::StructuredApi(Platform::Twitter),
    },
    SiteRule {
        suffix: "x.com",
        strategy: SiteStrategy::StructuredApi(Platform::Twitter),
    },
    SiteRule {
        suffix: "instagram.com",
        strategy: SiteStrategy::UnfurlOnly,
    },
    SiteRule {
        suffix: "facebook.com",
        strategy: SiteStrategy::UnfurlOnly,
    },
];

fn matches_suffix(host: &str, suffix: &str) -> bool {
    match host.strip_suffix(suffix) {
        Some("") => true,
        Some(prefix) => prefix.ends_with('.'),
        None => false,
    }
}

/// Finds the strategy for `host`, if any.
pub fn lookup_site(host: &str) -> Option<SiteStrategy> {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    SITE_TABLE
        .iter()
        .find(|rule| matches_suffix(&host, rule.suffix))
        .map(|rule| rule.strategy)
}

/// Runs the site-specific strategy for `url`.
///
/// Returns `Skip::NotApplicable` when `host` is not in [`SITE_TABLE`].
pub async fn try_site_specific(
    client: &reqwest::Client,
    config: &Config,
    url: &Url,
    host: &str,
) -> Result<Metadata, Skip> {
    match lookup_site(host) {
        Some(SiteStrategy::StructuredApi(Platform::Twitter)) => {
            twitter::fetch_twitter_metadata(client, config, url).await
        }
        Some(SiteStrategy::UnfurlOnly) => {
            log::debug!("{} has no reliable scrape path, using unfurl service", host);
            try_unfurl_service(client, config, url.as_str()).await
        }
        None => Err(Skip::NotApplicable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_site() {
        assert_eq!(
            lookup_site("x.com"),
            Some(SiteStrategy::StructuredApi(Platform::Twitter))
        );
        assert_eq!(
            lookup_site("mobile.twitter.com"),
            Some(SiteStrategy::StructuredApi(Platform::Twitter))
        );
        assert_eq!(lookup_site("www.instagram.com"), Some(SiteStrategy::UnfurlOnly));
        assert_eq!(lookup_site("Facebook.COM."), Some(SiteStrategy::UnfurlOnly));
    }

    #[test]
    fn test_lookup_site_requires_label_boundary() {
        assert_eq!(lookup_site("notx.com"), None);
        assert_eq!(lookup_site("x.com.evil.example"), None);
        assert_eq!(lookup_site("example.com"), None);
    }

    #[tokio::test]
    async fn test_unmatched_host_not_applicable() {
        let client = reqwest::Client::new();
        let url = Url::parse("https://example.com/").unwrap();
        let result = try_site_specific(&client, &Config::default(), &url, "example.com").await;
        assert!(matches!(result, Err(Skip::NotApplicable)));
    }
}
