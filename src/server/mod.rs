//! Demo HTTP server.
//!
//! Provides one endpoint:
//! - `POST /api/demo/metadata` - resolves a URL and returns its `Metadata`
//!
//! It calls the same `MetadataResolver::fetch_metadata` entry point as
//! bookmark creation, so the safety checks cannot be bypassed through it.

mod handlers;
mod types;

use std::sync::Arc;

use axum::routing::post;
use axum::Router;

use crate::config::DEMO_METADATA_ROUTE;
use crate::resolver::MetadataResolver;

use handlers::metadata_handler;
pub use handlers::{FETCH_FAILED_MESSAGE, INVALID_URL_MESSAGE};
pub use types::{DemoState, ErrorResponse};

/// Builds the demo router.
pub fn demo_router(resolver: Arc<MetadataResolver>) -> Router {
    Router::new()
        .route(DEMO_METADATA_ROUTE, post(metadata_handler))
        .with_state(DemoState { resolver })
}

/// Creates and starts the demo server on `bind`.
pub async fn start_demo_server(
    bind: &str,
    resolver: Arc<MetadataResolver>,
) -> Result<(), anyhow::Error> {
    let app = demo_router(resolver);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind demo server to {}: {}", bind, e))?;

    log::info!("Demo server listening on http://{}/", bind);
    log::info!("  - Metadata: POST http://{}{}", bind, DEMO_METADATA_ROUTE);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Demo server error: {}", e))?;

    Ok(())
}
