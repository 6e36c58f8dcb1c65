//! Generic favicon-by-domain fallback.
//!
//! Used whenever a page exposes no usable icon, so a resolved bookmark
//! always has something to display.

use url::Url;

use crate::config::FAVICON_SIZE;

/// Builds `{service_base}?domain={host}&sz=128`.
///
/// Returns `None` for an empty host or an unparseable service base.
pub fn generic_favicon_url(service_base: &str, host: &str) -> Option<String> {
    let host = host.trim().trim_start_matches('[').trim_end_matches(']');
    if host.is_empty() {
        return None;
    }
    let mut url = Url::parse(service_base).ok()?;
    url.query_pairs_mut()
        .append_pair("domain", host)
        .append_pair("sz", &FAVICON_SIZE.to_string());
    Some(url.into())
}

/// Best-effort variant for a raw, possibly invalid, URL string.
pub fn generic_favicon_for(service_base: &str, raw_url: &str) -> Option<String> {
    let parsed = Url::parse(raw_url.trim()).ok()?;
    generic_favicon_url(service_base, parsed.host_str()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FAVICON_SERVICE_BASE;

    #[test]
    fn test_generic_favicon_url() {
        assert_eq!(
            generic_favicon_url(FAVICON_SERVICE_BASE, "example.com").as_deref(),
            Some("https://www.google.com/s2/favicons?domain=example.com&sz=128")
        );
    }

    #[test]
    fn test_generic_favicon_url_ipv6_host_unbracketed() {
        let url = generic_favicon_url(FAVICON_SERVICE_BASE, "[2001:db8::1]").unwrap();
        assert!(url.contains("domain=2001%3Adb8%3A%3A1"), "{url}");
    }

    #[test]
    fn test_generic_favicon_url_rejects_empty() {
        assert_eq!(generic_favicon_url(FAVICON_SERVICE_BASE, "  "), None);
        assert_eq!(generic_favicon_url("not a base", "example.com"), None);
    }

    #[test]
    fn test_generic_favicon_for_raw_url() {
        assert_eq!(
            generic_favicon_for(FAVICON_SERVICE_BASE, "https://169.254.169.254/secret").as_deref(),
            Some("https://www.google.com/s2/favicons?domain=169.254.169.254&sz=128")
        );
        assert_eq!(generic_favicon_for(FAVICON_SERVICE_BASE, "not a url"), None);
    }
}
