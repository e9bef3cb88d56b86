//! Insight CRUD and search under /api/insights

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use insight_core::entities::Insight;
use insight_core::responses::DeleteResponse;
use insight_db::error::DatabaseError;

use crate::error::{Result, ServerError};
use crate::requests::{CreateInsightRequest, UpdateInsightRequest, filter_from_query};
use crate::state::AppState;

const NOT_FOUND: &str = "Insight not found";

/// GET /api/insights
///
/// Query keys are the camelCase field names; `targetBanks` and
/// `targetTables` may repeat and match insights containing any given value.
pub async fn list(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<Insight>>> {
    let Query(pairs) = query?;
    let filter = filter_from_query(pairs)?;
    let insights = state.db.list_insights(&filter).await?;
    Ok(Json(insights))
}

/// GET /api/insights/:id
pub async fn get_one(
    State(state): State<Arc<AppState>>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<Insight>> {
    let Path(id) = id?;
    match state.db.get_insight(id).await {
        Ok(insight) => Ok(Json(insight)),
        Err(DatabaseError::NoResult) => Err(ServerError::not_found(NOT_FOUND)),
        Err(err) => Err(err.into()),
    }
}

/// POST /api/insights
pub async fn create(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<CreateInsightRequest>, JsonRejection>,
) -> Result<Json<Insight>> {
    let Json(request) = body?;
    let data = request.into_data()?;
    let insight = state
        .db
        .create_insight(&data)
        .await
        .map_err(|e| ServerError::bad_request(format!("Failed to create insight: {e}")))?;
    tracing::info!(id = insight.id, insight_id = %insight.data.insight_id, "insight created");
    Ok(Json(insight))
}

/// PUT /api/insights/:id
pub async fn update(
    State(state): State<Arc<AppState>>,
    id: std::result::Result<Path<i64>, PathRejection>,
    body: std::result::Result<Json<UpdateInsightRequest>, JsonRejection>,
) -> Result<Json<Insight>> {
    let Path(id) = id?;
    let Json(request) = body?;
    let update = request.into_update();
    match state.db.update_insight(id, &update).await {
        Ok(insight) => Ok(Json(insight)),
        Err(DatabaseError::NoResult) => Err(ServerError::not_found(NOT_FOUND)),
        Err(err) => Err(ServerError::bad_request(format!(
            "Failed to update insight: {err}"
        ))),
    }
}

/// DELETE /api/insights/:id
pub async fn delete(
    State(state): State<Arc<AppState>>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteResponse>> {
    let Path(id) = id?;
    state.db.delete_insight(id).await.map_err(|e| {
        tracing::warn!(id, error = %e, "insight delete failed");
        ServerError::bad_request("Failed to delete insight")
    })?;
    Ok(Json(DeleteResponse { success: true }))
}
