use axum::{
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing, Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::auth::require_basic_auth;
use crate::response::error_body;
use crate::routes::{fragments, health};
use crate::AppState;

/// Assemble the full application router: the health check, the Basic-auth
/// protected `/v1/fragments` routes, the envelope-shaped 404 fallback, and
/// the trace + request-id layers.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/fragments",
            routing::get(fragments::list_fragments).post(fragments::create_fragment),
        )
        .route(
            "/fragments/{id}",
            routing::get(fragments::get_fragment).delete(fragments::delete_fragment),
        )
        .route(
            "/fragments/{id}/info",
            routing::get(fragments::get_fragment_info),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_basic_auth,
        ));

    Router::new()
        .route("/", routing::get(health::health))
        .nest("/v1", api)
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(error_body(404, "not found")))
}
