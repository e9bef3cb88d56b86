//! GET /health

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use insight_core::responses::HealthResponse;

use crate::state::AppState;

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    tracing::debug!("health check requested");
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        uptime: state.uptime_secs(),
    })
}
