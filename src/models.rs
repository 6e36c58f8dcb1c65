//! Output record of the resolver.

use serde::{Deserialize, Serialize};

/// Preview metadata for one URL.
///
/// `title` is never empty: it falls back to the hostname or the raw URL.
/// `image_url` and `favicon_url` are absolute when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Display title
    pub title: String,
    /// Page description, if any
    pub description: Option<String>,
    /// Preview image
    pub image_url: Option<String>,
    /// Site icon
    pub favicon_url: Option<String>,
}

impl Metadata {
    /// The degraded result: the raw URL as the title plus an optional icon.
    pub fn minimal(url: &str, favicon_url: Option<String>) -> Self {
        Self {
            title: url.to_string(),
            description: None,
            image_url: None,
            favicon_url,
        }
    }
}
