//! Bulk CSV endpoints: POST /api/insights/import/csv, GET /api/insights/export/csv

use std::sync::Arc;

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::IntoResponse;
use insight_core::responses::ImportResponse;
use insight_csv::{ImportOptions, export_document, import_upload};

use crate::error::{Result, ServerError};
use crate::state::AppState;

/// Multipart form field holding the uploaded file.
const FILE_FIELD: &str = "file";

/// POST /api/insights/import/csv
///
/// Rows that fail are listed in `errorDetails`; the request itself only
/// fails when the upload is missing or structurally unusable.
pub async fn import(
    State(state): State<Arc<AppState>>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<ImportResponse>> {
    let mut multipart = multipart.map_err(|_| ServerError::bad_request("No file provided"))?;

    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(FILE_FIELD) {
            upload = Some(field.bytes().await?);
            break;
        }
    }
    let bytes = upload.ok_or_else(|| ServerError::bad_request("No file provided"))?;
    tracing::debug!(bytes = bytes.len(), "CSV upload received");

    let options = ImportOptions {
        long_line_warn_chars: state.config.import.long_line_warn_chars,
    };
    let report = import_upload(&state.db, &bytes, &options).await?;
    Ok(Json(report.summary()))
}

/// GET /api/insights/export/csv
pub async fn export(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse> {
    let document = export_document(&state.db).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=insights.csv",
            ),
        ],
        document,
    ))
}
