//! Ordered selector tables for each metadata field.
//!
//! Each field has a fixed priority list; the first selector that yields a
//! non-empty value wins. Selectors are compiled once.

use scraper::Selector;
use std::sync::LazyLock;

use crate::utils::parse_selector_unsafe;

/// Where a matched element's value is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadFrom {
    /// `content` attribute (`<meta>`)
    Content,
    /// `href` attribute (`<link>`)
    Href,
    /// Text content of the element (`<title>`)
    Text,
}

/// One entry in a field's priority list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorSpec {
    pub css: &'static str,
    pub read: ReadFrom,
}

const fn spec(css: &'static str, read: ReadFrom) -> SelectorSpec {
    SelectorSpec { css, read }
}

pub const TITLE_SELECTORS: &[SelectorSpec] = &[
    spec("meta[property='og:title']", ReadFrom::Content),
    spec("meta[name='twitter:title']", ReadFrom::Content),
    spec("title", ReadFrom::Text),
];

pub const DESCRIPTION_SELECTORS: &[SelectorSpec] = &[
    spec("meta[property='og:description']", ReadFrom::Content),
    spec("meta[name='twitter:description']", ReadFrom::Content),
    spec("meta[name='description']", ReadFrom::Content),
];

pub const IMAGE_SELECTORS: &[SelectorSpec] = &[
    spec("meta[property='og:image']", ReadFrom::Content),
    spec("meta[name='twitter:image']", ReadFrom::Content),
    spec("link[rel='image_src']", ReadFrom::Href),
    spec("meta[itemprop='image']", ReadFrom::Content),
];

pub const FAVICON_SELECTORS: &[SelectorSpec] = &[
    spec("link[rel~='apple-touch-icon']", ReadFrom::Href),
    spec("link[rel='icon']", ReadFrom::Href),
    spec("link[rel='shortcut icon']", ReadFrom::Href),
    spec("link[rel~='mask-icon']", ReadFrom::Href),
];

/// A selector table with its compiled selectors, in the same order.
pub struct CompiledField {
    pub specs: &'static [SelectorSpec],
    pub selectors: Vec<Selector>,
}

impl CompiledField {
    fn compile(name: &str, specs: &'static [SelectorSpec]) -> Self {
        let selectors = specs
            .iter()
            .map(|s| parse_selector_unsafe(s.css, name))
            .collect();
        Self { specs, selectors }
    }

    /// `(spec, selector)` pairs in priority order.
    pub fn iter(&self) -> impl Iterator<Item = (&SelectorSpec, &Selector)> {
        self.specs.iter().zip(self.selectors.iter())
    }
}

pub static TITLE: LazyLock<CompiledField> =
    LazyLock::new(|| CompiledField::compile("TITLE_SELECTORS", TITLE_SELECTORS));
pub static DESCRIPTION: LazyLock<CompiledField> =
    LazyLock::new(|| CompiledField::compile("DESCRIPTION_SELECTORS", DESCRIPTION_SELECTORS));
pub static IMAGE: LazyLock<CompiledField> =
    LazyLock::new(|| CompiledField::compile("IMAGE_SELECTORS", IMAGE_SELECTORS));
pub static FAVICON: LazyLock<CompiledField> =
    LazyLock::new(|| CompiledField::compile("FAVICON_SELECTORS", FAVICON_SELECTORS));
