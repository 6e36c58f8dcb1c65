//! Bookmark-creation glue.
//!
//! Shows how the resolver is consumed: the duplicate check and the metadata
//! fetch run concurrently, and an existing bookmark short-circuits the save.
//! Persistence belongs to the caller.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error_handling::BookmarkError;
use crate::models::Metadata;
use crate::resolver::MetadataResolver;

/// The row a caller inserts for a new bookmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkDraft {
    pub url: String,
    pub workspace_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub og_image_url: Option<String>,
    pub favicon_url: Option<String>,
}

impl BookmarkDraft {
    pub fn from_metadata(url: &str, workspace_id: Option<String>, metadata: Metadata) -> Self {
        Self {
            url: url.to_string(),
            workspace_id,
            title: metadata.title,
            description: metadata.description,
            og_image_url: metadata.image_url,
            favicon_url: metadata.favicon_url,
        }
    }
}

/// Runs `exists` and the metadata fetch concurrently.
///
/// # Errors
///
/// - `BookmarkError::AlreadyExists` if `exists` reports a duplicate
/// - `BookmarkError::DuplicateCheck` if `exists` itself fails
///
/// Metadata resolution cannot fail, so neither error comes from it.
pub async fn prepare_bookmark<F, Fut, E>(
    resolver: &MetadataResolver,
    url: &str,
    workspace_id: Option<String>,
    exists: F,
) -> Result<BookmarkDraft, BookmarkError<E>>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    let (existing, metadata) = tokio::join!(exists(), resolver.fetch_metadata(url));

    match existing {
        Ok(true) => {
            log::debug!("Bookmark for {} already exists", url);
            Err(BookmarkError::AlreadyExists)
        }
        Ok(false) => Ok(BookmarkDraft::from_metadata(url, workspace_id, metadata)),
        Err(e) => Err(BookmarkError::DuplicateCheck(e)),
    }
}
