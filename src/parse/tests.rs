// Parse module tests.

use super::*;
use url::Url;

fn base() -> Url {
    Url::parse("https://example.com/articles/post").unwrap()
}

#[test]
fn test_og_title_wins_over_title_tag() {
    let html = r#"<html><head>
        <title>Tag Title</title>
        <meta name="twitter:title" content="Twitter Title">
        <meta property="og:title" content="Example Title">
    </head></html>"#;
    assert_eq!(extract(html, &base()).title, "Example Title");
}

#[test]
fn test_twitter_title_before_title_tag() {
    let html = r#"<head><title>Tag Title</title><meta name="twitter:title" content="Card"></head>"#;
    assert_eq!(extract(html, &base()).title, "Card");
}

#[test]
fn test_empty_og_title_falls_through() {
    // Blank candidates never win
    let html = r#"<head><meta property="og:title" content="   "><title> Real </title></head>"#;
    assert_eq!(extract(html, &base()).title, "Real");
}

#[test]
fn test_title_falls_back_to_hostname() {
    let html = "<html><body><p>no head</p></body></html>";
    assert_eq!(extract(html, &base()).title, "example.com");
}

#[test]
fn test_title_entities_decoded() {
    // The parser decodes one level; double-encoded values need another pass
    let html = r#"<head><meta property="og:title" content="Q&amp;amp;A &amp;#39;24"></head>"#;
    assert_eq!(extract(html, &base()).title, "Q&A '24");
}

#[test]
fn test_title_literal_entity_text_is_decoded() {
    let html = "<head><title>&amp;lt;b&amp;gt; tags</title></head>";
    assert_eq!(extract(html, &base()).title, "<b> tags");
}

#[test]
fn test_description_accented_entities() {
    let html = r#"<head><meta name="description" content="Caf&amp;eacute; in M&uuml;nchen"></head>"#;
    assert_eq!(
        extract(html, &base()).description.as_deref(),
        Some("Café in München")
    );
}

#[test]
fn test_title_text_entities() {
    let html = "<head><title>Tom &amp; Jerry</title></head>";
    assert_eq!(extract(html, &base()).title, "Tom & Jerry");
}

#[test]
fn test_description_priority() {
    let html = r#"<head>
        <meta name="description" content="Generic">
        <meta name="twitter:description" content="Card">
    </head>"#;
    assert_eq!(extract(html, &base()).description.as_deref(), Some("Card"));

    let html = r#"<head><meta name="description" content="  Generic  "></head>"#;
    assert_eq!(extract(html, &base()).description.as_deref(), Some("Generic"));
}

#[test]
fn test_whitespace_description_is_none() {
    let html = r#"<head><meta property="og:description" content=" 	 "></head>"#;
    assert_eq!(extract(html, &base()).description, None);
}

#[test]
fn test_missing_description_is_none() {
    assert_eq!(extract("<title>x</title>", &base()).description, None);
}

#[test]
fn test_image_priority_and_resolution() {
    let html = r#"<head>
        <link rel="image_src" href="/src.png">
        <meta property="og:image" content="../img/og.png">
    </head>"#;
    assert_eq!(
        extract(html, &base()).image_url.as_deref(),
        Some("https://example.com/img/og.png")
    );
}

#[test]
fn test_image_src_link_and_itemprop() {
    let html = r#"<head><link rel="image_src" href="//cdn.example.net/a.jpg"></head>"#;
    assert_eq!(
        extract(html, &base()).image_url.as_deref(),
        Some("https://cdn.example.net/a.jpg")
    );

    let html = r#"<body><meta itemprop="image" content="https://img.example.org/b.jpg"></body>"#;
    assert_eq!(
        extract(html, &base()).image_url.as_deref(),
        Some("https://img.example.org/b.jpg")
    );
}

#[test]
fn test_unresolvable_image_is_absent() {
    let html = r#"<head><meta property="og:image" content="https://[broken/x.png"></head>"#;
    assert_eq!(extract(html, &base()).image_url, None);

    let html = r#"<head><meta property="og:image" content="javascript:alert(1)"></head>"#;
    assert_eq!(extract(html, &base()).image_url, None);
}

#[test]
fn test_relative_favicon_resolved_against_base() {
    let html = r#"<head><link rel="icon" href="/favicon.png"></head>"#;
    assert_eq!(
        extract(html, &base()).favicon_url.as_deref(),
        Some("https://example.com/favicon.png")
    );
}

#[test]
fn test_favicon_resolution_uses_final_url() {
    let html = r#"<head><link rel="icon" href="favicon.ico"></head>"#;
    let final_url = Url::parse("https://www.example.org/blog/").unwrap();
    assert_eq!(
        extract(html, &final_url).favicon_url.as_deref(),
        Some("https://www.example.org/blog/favicon.ico")
    );
}

#[test]
fn test_favicon_priority() {
    let html = r#"<head>
        <link rel="shortcut icon" href="/shortcut.ico">
        <link rel="icon" href="/icon.png">
        <link rel="apple-touch-icon" sizes="180x180" href="/touch.png">
    </head>"#;
    assert_eq!(
        extract(html, &base()).favicon_url.as_deref(),
        Some("https://example.com/touch.png")
    );
}

#[test]
fn test_shortcut_and_mask_icon() {
    let html = r#"<head><link rel="shortcut icon" href="/s.ico"></head>"#;
    assert_eq!(
        extract(html, &base()).favicon_url.as_deref(),
        Some("https://example.com/s.ico")
    );

    let html = r#"<head><link rel="mask-icon" href="/mask.svg" color="black"></head>"#;
    assert_eq!(
        extract(html, &base()).favicon_url.as_deref(),
        Some("https://example.com/mask.svg")
    );
}

#[test]
fn test_missing_favicon_uses_generic_service() {
    assert_eq!(
        extract("<title>x</title>", &base()).favicon_url.as_deref(),
        Some("https://www.google.com/s2/favicons?domain=example.com&sz=128")
    );
}

#[test]
fn test_custom_favicon_service() {
    let extractor = HtmlExtractor::new("http://127.0.0.1:9/icons");
    assert_eq!(
        extractor.extract("", &base()).favicon_url.as_deref(),
        Some("http://127.0.0.1:9/icons?domain=example.com&sz=128")
    );
}

#[test]
fn test_extraction_is_idempotent() {
    let html = r#"<head>
        <title>Same</title>
        <meta property="og:image" content="/a.png">
        <link rel="icon" href="/i.png">
    </head>"#;
    let extractor = HtmlExtractor::default();
    let first = extractor.extract(html, &base());
    let second = extractor.extract(html, &base());
    assert_eq!(first, second);
}

#[test]
fn test_malformed_html_still_extracts() {
    let html = "<html><head><title>Broken<meta property='og:description' content='d'";
    let m = extract(html, &base());
    assert!(!m.title.is_empty());
    assert!(m.favicon_url.is_some());
}

#[test]
fn test_selector_tables_are_ordered() {
    assert_eq!(TITLE_SELECTORS[0].css, "meta[property='og:title']");
    assert_eq!(TITLE_SELECTORS.last().map(|s| s.read), Some(ReadFrom::Text));
    assert!(FAVICON_SELECTORS.iter().all(|s| s.read == ReadFrom::Href));
    assert_eq!(DESCRIPTION_SELECTORS.len(), 3);
    assert_eq!(IMAGE_SELECTORS.len(), 4);
}

#[test]
fn test_decode_entities_reexported() {
    assert_eq!(decode_entities("a &amp; b"), "a & b");
}

#[test]
fn test_hostname_title() {
    assert_eq!(hostname_title(&base()), "example.com");
}
