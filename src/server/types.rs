//! Demo server data structures.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::resolver::MetadataResolver;

/// Shared state for the demo server
#[derive(Clone)]
pub struct DemoState {
    pub resolver: Arc<MetadataResolver>,
}

/// Body of `POST /api/demo/metadata`
#[derive(Debug, Deserialize)]
pub struct MetadataRequest {
    pub url: Option<String>,
}

/// JSON error body
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
