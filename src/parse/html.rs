//! Generic HTML metadata extraction.
//!
//! Reads title, description, image and favicon from a bounded HTML document
//! using the ordered tables in `selectors`. Extraction is pure: the same
//! `(html, base_url)` always yields the same `Metadata`.

use scraper::{ElementRef, Html};
use url::Url;

use super::entities::decode_entities;
use super::selectors::{CompiledField, ReadFrom, DESCRIPTION, FAVICON, IMAGE, TITLE};
use crate::config::FAVICON_SERVICE_BASE;
use crate::favicon::generic_favicon_url;
use crate::models::Metadata;
use crate::utils::non_empty_trimmed;

/// HTML extractor bound to a favicon service for the missing-icon fallback.
#[derive(Debug, Clone)]
pub struct HtmlExtractor {
    favicon_service: String,
}

impl Default for HtmlExtractor {
    fn default() -> Self {
        Self::new(FAVICON_SERVICE_BASE)
    }
}

impl HtmlExtractor {
    /// Creates an extractor that synthesizes icons from `favicon_service`.
    pub fn new(favicon_service: impl Into<String>) -> Self {
        Self {
            favicon_service: favicon_service.into(),
        }
    }

    /// Extracts metadata from `html`, resolving links against `base_url`.
    ///
    /// `base_url` must be the final (post-redirect) URL of the page.
    pub fn extract(&self, html: &str, base_url: &Url) -> Metadata {
        let document = Html::parse_document(html);

        // Text from the parser is decoded once more so double-encoded
        // metadata reads cleanly. Literal entity text in a title
        // (`&amp;lt;b&amp;gt;` in markup) therefore comes out as `<b>`.
        let title = first_candidate(&document, &TITLE)
            .and_then(|raw| non_empty_trimmed(&decode_entities(&raw)))
            .unwrap_or_else(|| hostname_title(base_url));

        let description = first_candidate(&document, &DESCRIPTION)
            .and_then(|raw| non_empty_trimmed(&decode_entities(&raw)));

        let image_url =
            first_candidate(&document, &IMAGE).and_then(|raw| resolve_link(base_url, &raw));

        let favicon_url = first_candidate(&document, &FAVICON)
            .and_then(|raw| resolve_link(base_url, &raw))
            .or_else(|| {
                base_url
                    .host_str()
                    .and_then(|host| generic_favicon_url(&self.favicon_service, host))
            });

        log::debug!(
            "Extracted from {}: title={:?} description={} image={} favicon={}",
            base_url,
            title,
            description.is_some(),
            image_url.is_some(),
            favicon_url.is_some()
        );

        Metadata {
            title,
            description,
            image_url,
            favicon_url,
        }
    }
}

/// Extracts metadata with the default favicon service.
pub fn extract(html: &str, base_url: &Url) -> Metadata {
    HtmlExtractor::default().extract(html, base_url)
}

/// The bare hostname used when a page has no title.
pub fn hostname_title(url: &Url) -> String {
    url.host_str()
        .map(str::to_string)
        .unwrap_or_else(|| url.to_string())
}

/// First non-empty value across the field's selectors, in priority order.
fn first_candidate(document: &Html, field: &CompiledField) -> Option<String> {
    field.iter().find_map(|(spec, selector)| {
        document
            .select(selector)
            .find_map(|element| read_value(element, spec.read))
    })
}

fn read_value(element: ElementRef<'_>, read: ReadFrom) -> Option<String> {
    match read {
        ReadFrom::Content => element.value().attr("content").and_then(non_empty_trimmed),
        ReadFrom::Href => element.value().attr("href").and_then(non_empty_trimmed),
        ReadFrom::Text => non_empty_trimmed(&element.text().collect::<String>()),
    }
}

/// Resolves `raw` against `base`. Anything that does not produce an
/// absolute http(s) URL is treated as absent.
fn resolve_link(base: &Url, raw: &str) -> Option<String> {
    match base.join(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Some(url.into()),
        Ok(url) => {
            log::debug!("Ignoring non-http link {} on {}", url.scheme(), base);
            None
        }
        Err(e) => {
            log::debug!("Failed to resolve link {:?} against {}: {}", raw, base, e);
            None
        }
    }
}
