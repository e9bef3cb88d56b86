//! HTTP route handlers and router configuration

mod csv;
mod health;
mod insights;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the main application router
pub fn build_router(state: Arc<AppState>) -> Router {
    let upload_limit = state.config.import.max_upload_bytes;
    let cors_enabled = state.config.server.cors_enabled;

    let mut router = Router::new()
        .route("/health", get(health::health))
        .route(
            "/api/insights",
            get(insights::list).post(insights::create),
        )
        .route(
            "/api/insights/:id",
            get(insights::get_one)
                .put(insights::update)
                .delete(insights::delete),
        )
        .route("/api/insights/import/csv", post(csv::import))
        .route("/api/insights/export/csv", get(csv::export))
        .with_state(state)
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(TraceLayer::new_for_http());

    if cors_enabled {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router
}
