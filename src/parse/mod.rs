//! HTML parsing and metadata extraction.
//!
//! This module extracts preview metadata from HTML content:
//! - Title (Open Graph, Twitter Card, `<title>`, hostname fallback)
//! - Description (Open Graph, Twitter Card, `description` meta)
//! - Preview image (Open Graph, Twitter Card, `image_src`, microdata)
//! - Favicon (touch icon, icon links, generic favicon service)
//!
//! All parsing is done using CSS selectors via the `scraper` crate.

mod entities;
mod html;
mod selectors;

// Re-export public API
pub use entities::decode_entities;
pub use html::{extract, hostname_title, HtmlExtractor};
pub use selectors::{
    ReadFrom, SelectorSpec, DESCRIPTION_SELECTORS, FAVICON_SELECTORS, IMAGE_SELECTORS,
    TITLE_SELECTORS,
};
