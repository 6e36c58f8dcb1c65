//! Demo endpoint handler.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use url::Url;

use super::types::{DemoState, ErrorResponse, MetadataRequest};

pub const INVALID_URL_MESSAGE: &str = "Invalid URL format";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch metadata";

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}

/// `POST /api/demo/metadata` with `{"url": "..."}`.
///
/// The URL is only checked for syntax here; safety is enforced by the
/// resolver exactly as for bookmark creation.
pub async fn metadata_handler(
    State(state): State<DemoState>,
    payload: Result<Json<MetadataRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(JsonRejection::JsonDataError(e)) => {
            log::debug!("Demo request with bad shape: {}", e);
            return error_response(StatusCode::BAD_REQUEST, INVALID_URL_MESSAGE);
        }
        Err(rejection) => {
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    let url = match request.url {
        Some(url) if Url::parse(&url).is_ok() => url,
        _ => return error_response(StatusCode::BAD_REQUEST, INVALID_URL_MESSAGE),
    };

    // A panic escaping the resolver surfaces here as a JoinError
    let resolver = state.resolver.clone();
    match tokio::spawn(async move { resolver.fetch_metadata(&url).await }).await {
        Ok(metadata) => (StatusCode::OK, Json(metadata)).into_response(),
        Err(e) => {
            log::error!("Demo metadata fetch error: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED_MESSAGE)
        }
    }
}
