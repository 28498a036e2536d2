use std::sync::Arc;

use axum::http::header::{HeaderName, AUTHORIZATION, CONTENT_TYPE};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ])
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/babysitters",
            post(handlers::babysitters::gateway).options(handlers::babysitters::preflight),
        )
        .route(
            "/api/babysitters/:id/soft-delete",
            post(handlers::babysitters::soft_delete),
        )
        .route(
            "/api/requests",
            get(handlers::requests::list_requests).post(handlers::requests::create_request),
        )
        .route(
            "/api/requests/:id/action",
            post(handlers::requests::request_action),
        )
        .route("/api/users", post(handlers::users::create_user))
        .route("/api/users/:mobile", get(handlers::users::get_user))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
