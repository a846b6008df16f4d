use axum::{http::header, response::IntoResponse};
use serde_json::json;

use crate::response::success;

/// Unauthenticated health check. `Cache-Control: no-cache` so load balancers
/// always see a fresh answer.
pub async fn health() -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "no-cache")],
        success(json!({
            "githubUrl": env!("CARGO_PKG_REPOSITORY"),
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}
