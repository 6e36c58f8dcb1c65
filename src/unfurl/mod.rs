//! Third-party unfurl service fallback.
//!
//! Best effort only: every failure is a [`Skip`], never an error the caller
//! has to handle. The service is called with the target URL as the `url`
//! query parameter and answers with a `{status, data}` JSON envelope.

use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;
use url::Url;

use crate::config::{Config, MAX_API_RESPONSE_SIZE};
use crate::error_handling::Skip;
use crate::fetch::read_json_bounded;
use crate::models::Metadata;
use crate::parse::decode_entities;
use crate::utils::non_empty_trimmed;

const SUCCESS_STATUS: &str = "success";

#[derive(Debug, Deserialize)]
struct UnfurlResponse {
    status: Option<String>,
    data: Option<UnfurlData>,
}

#[derive(Debug, Default, Deserialize)]
struct UnfurlData {
    title: Option<String>,
    description: Option<String>,
    image: Option<UnfurlAsset>,
    logo: Option<UnfurlAsset>,
}

#[derive(Debug, Deserialize)]
struct UnfurlAsset {
    url: Option<String>,
}

impl UnfurlAsset {
    fn into_url(self) -> Option<String> {
        self.url.as_deref().and_then(non_empty_trimmed)
    }
}

/// Asks the configured unfurl service for `url`'s metadata.
///
/// Non-2xx responses and payloads whose `status` is not `"success"` are
/// skipped. A missing title falls back to `url`.
pub async fn try_unfurl_service(
    client: &reqwest::Client,
    config: &Config,
    url: &str,
) -> Result<Metadata, Skip> {
    let mut api_url = Url::parse(&config.endpoints.unfurl_api)
        .map_err(|e| Skip::Upstream(format!("bad unfurl endpoint: {}", e)))?;
    api_url.query_pairs_mut().append_pair("url", url);

    log::debug!("Unfurl request for {}", url);
    let response = client
        .get(api_url)
        .header(ACCEPT, "application/json")
        .header(USER_AGENT, &config.api_user_agent)
        .timeout(config.unfurl_timeout)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        log::debug!("Unfurl service returned {} for {}", status, url);
        return Err(Skip::Status(status.as_u16()));
    }

    let body: UnfurlResponse = read_json_bounded(response, MAX_API_RESPONSE_SIZE).await?;
    if body.status.as_deref() != Some(SUCCESS_STATUS) {
        return Err(Skip::Upstream(format!(
            "unfurl status {:?}",
            body.status.unwrap_or_default()
        )));
    }

    let data = body.data.unwrap_or_default();
    let title = data
        .title
        .as_deref()
        .and_then(|t| non_empty_trimmed(&decode_entities(t)))
        .unwrap_or_else(|| url.to_string());

    Ok(Metadata {
        title,
        description: data.description.as_deref().and_then(non_empty_trimmed),
        image_url: data.image.and_then(UnfurlAsset::into_url),
        favicon_url: data.logo.and_then(UnfurlAsset::into_url),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{matchers::*, responders::*, Expectation, Server};
    use serde_json::json;

    fn config_for(server: &Server) -> Config {
        let mut config = Config::default();
        config.endpoints.unfurl_api = server.url_str("/");
        config
    }

    #[tokio::test]
    async fn test_maps_success_payload() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/"),
                request::query(url_decoded(contains(("url", "https://example.com/post")))),
            ])
            .respond_with(json_encoded(json!({
                "status": "success",
                "data": {
                    "title": "Fish &amp; Chips &eacute;t&eacute;",
                    "description": "A post",
                    "image": {"url": "https://cdn.example.com/og.png"},
                    "logo": {"url": "https://cdn.example.com/logo.png"}
                }
            }))),
        );

        let client = reqwest::Client::new();
        let meta = try_unfurl_service(&client, &config_for(&server), "https://example.com/post")
            .await
            .unwrap();
        assert_eq!(meta.title, "Fish & Chips été");
        assert_eq!(meta.description.as_deref(), Some("A post"));
        assert_eq!(meta.image_url.as_deref(), Some("https://cdn.example.com/og.png"));
        assert_eq!(meta.favicon_url.as_deref(), Some("https://cdn.example.com/logo.png"));
    }

    #[tokio::test]
    async fn test_missing_fields_fall_back() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/")).respond_with(json_encoded(
                json!({"status": "success", "data": {"title": null, "image": null}}),
            )),
        );

        let client = reqwest::Client::new();
        let meta = try_unfurl_service(&client, &config_for(&server), "https://example.com/x")
            .await
            .unwrap();
        assert_eq!(meta, Metadata::minimal("https://example.com/x", None));
    }

    #[tokio::test]
    async fn test_non_success_status_field_skips() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/")).respond_with(json_encoded(
                json!({"status": "fail", "data": {"title": "ignored"}}),
            )),
        );

        let client = reqwest::Client::new();
        let result = try_unfurl_service(&client, &config_for(&server), "https://example.com/").await;
        assert!(matches!(result, Err(Skip::Upstream(_))));
    }

    #[tokio::test]
    async fn test_http_error_skips() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/"))
                .respond_with(status_code(429)),
        );

        let client = reqwest::Client::new();
        let result = try_unfurl_service(&client, &config_for(&server), "https://example.com/").await;
        assert!(matches!(result, Err(Skip::Status(429))));
    }

    #[tokio::test]
    async fn test_title_decoded_one_level() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/")).respond_with(json_encoded(
                json!({"status": "success", "data": {"title": "Q&amp;amp;A"}}),
            )),
        );

        let client = reqwest::Client::new();
        let meta = try_unfurl_service(&client, &config_for(&server), "https://example.com/")
            .await
            .unwrap();
        assert_eq!(meta.title, "Q&amp;A");
    }

    #[tokio::test]
    async fn test_oversized_payload_skips() {
        let mut body = br#"{"status": "success", "data": {"title": "Big"}}"#.to_vec();
        body.resize(MAX_API_RESPONSE_SIZE + 1024, b' ');

        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/")).respond_with(
                status_code(200)
                    .insert_header("Content-Type", "application/json")
                    .body(body),
            ),
        );

        let client = reqwest::Client::new();
        let result = try_unfurl_service(&client, &config_for(&server), "https://example.com/").await;
        assert!(matches!(result, Err(Skip::Upstream(msg)) if msg.contains("larger than")));
    }

    #[tokio::test]
    async fn test_invalid_json_skips() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/"))
                .respond_with(status_code(200).body("<html>not json</html>")),
        );

        let client = reqwest::Client::new();
        let result = try_unfurl_service(&client, &config_for(&server), "https://example.com/").await;
        assert!(matches!(result, Err(Skip::Upstream(_))));
    }
}
