//! HTTP request building.

use crate::config::HTML_ACCEPT;

/// Browser-like request headers for the page fetch.
///
/// Sites that fingerprint headers often serve a block page (or no metadata)
/// to bare clients. The User-Agent itself is set on the client.
pub(crate) struct RequestHeaders;

impl RequestHeaders {
    /// Applies the standard page-fetch headers to a `reqwest::RequestBuilder`.
    pub(crate) fn apply_to_request_builder(
        builder: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        builder
            .header(reqwest::header::ACCEPT, HTML_ACCEPT)
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(reqwest::header::UPGRADE_INSECURE_REQUESTS, "1")
    }
}

/// `true` if the response advertises HTML/XHTML, or sends no content type at
/// all (some servers omit it).
pub(crate) fn is_html_content_type(headers: &reqwest::header::HeaderMap) -> bool {
    match headers.get(reqwest::header::CONTENT_TYPE) {
        Some(ct) => {
            let ct = ct.to_str().unwrap_or("").to_ascii_lowercase();
            ct.starts_with("text/html") || ct.starts_with("application/xhtml")
        }
        None => true,
    }
}
