//! HTML entity decoding.
//!
//! The parser already decodes entities in well-formed markup; this pass
//! handles double-encoded values (`&amp;amp;`) and raw entity text that arrives
//! from JSON APIs. The named-entity table is the full HTML5 set from
//! `html-escape`.

/// Decodes one level of named (`&eacute;`), decimal (`&#39;`) and hex
/// (`&#x27;`) entities.
///
/// Unknown or malformed entities are left as written.
pub fn decode_entities(input: &str) -> String {
    html_escape::decode_html_entities(input).into_owned()
}
