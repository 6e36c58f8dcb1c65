//! Twitter/X via the fxtwitter JSON API.
//!
//! `https://x.com/{user}/status/{id}` maps to `{api}/{user}/status/{id}`,
//! which answers with either a `tweet` or (for profile paths) a `user`.

use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;
use url::Url;

use crate::config::{Config, MAX_API_RESPONSE_SIZE, TWEET_TITLE_CHARS};
use crate::error_handling::Skip;
use crate::fetch::read_json_bounded;
use crate::models::Metadata;
use crate::utils::{non_empty_trimmed, truncate_chars};

#[derive(Debug, Deserialize)]
struct FxResponse {
    tweet: Option<FxTweet>,
    user: Option<FxUser>,
}

#[derive(Debug, Deserialize)]
struct FxTweet {
    #[serde(default)]
    text: String,
    author: FxAuthor,
    media: Option<FxMedia>,
}

#[derive(Debug, Deserialize)]
struct FxAuthor {
    name: String,
    avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FxMedia {
    #[serde(default)]
    photos: Vec<FxPhoto>,
}

#[derive(Debug, Deserialize)]
struct FxPhoto {
    url: String,
}

#[derive(Debug, Deserialize)]
struct FxUser {
    name: String,
    screen_name: String,
    description: Option<String>,
    avatar_url: Option<String>,
}

pub(super) async fn fetch_twitter_metadata(
    client: &reqwest::Client,
    config: &Config,
    url: &Url,
) -> Result<Metadata, Skip> {
    let api_url = format!(
        "{}{}",
        config.endpoints.fxtwitter_api.trim_end_matches('/'),
        url.path()
    );
    log::debug!("Fetching {} via {}", url, api_url);

    let response = client
        .get(&api_url)
        .header(ACCEPT, "application/json")
        .header(USER_AGENT, &config.api_user_agent)
        .timeout(config.site_api_timeout)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        log::debug!("fxtwitter returned {} for {}", status, url);
        return Err(Skip::Status(status.as_u16()));
    }

    let body: FxResponse = read_json_bounded(response, MAX_API_RESPONSE_SIZE).await?;
    if let Some(tweet) = body.tweet {
        return Ok(tweet_metadata(tweet));
    }
    if let Some(user) = body.user {
        return Ok(profile_metadata(user));
    }
    Err(Skip::Upstream("fxtwitter response had no tweet or user".to_string()))
}

fn tweet_metadata(tweet: FxTweet) -> Metadata {
    let FxTweet {
        text,
        author,
        media,
    } = tweet;
    let title = format!(
        "{} on X: \"{}...\"",
        author.name,
        truncate_chars(&text, TWEET_TITLE_CHARS)
    );
    let avatar = author.avatar_url.as_deref().and_then(non_empty_trimmed);
    let photo = media
        .and_then(|m| m.photos.into_iter().next())
        .and_then(|p| non_empty_trimmed(&p.url));

    Metadata {
        title,
        description: non_empty_trimmed(&text),
        image_url: photo.or_else(|| avatar.clone()),
        favicon_url: avatar,
    }
}

fn profile_metadata(user: FxUser) -> Metadata {
    let avatar = user.avatar_url.as_deref().and_then(non_empty_trimmed);
    Metadata {
        title: format!("{} (@{}) / X", user.name, user.screen_name),
        description: user.description.as_deref().and_then(non_empty_trimmed),
        // "_normal" is the 48px variant
        image_url: avatar.as_ref().map(|a| a.replace("_normal", "")),
        favicon_url: avatar,
    }
}
