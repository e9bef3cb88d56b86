//! Server error types with HTTP status code mapping.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use insight_core::responses::ErrorResponse;
use insight_csv::{ExportError, ImportError};
use insight_db::error::DatabaseError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Error, Debug)]
pub enum ServerError {
    /// Client sent something unusable.
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// Structural CSV problem (empty, not UTF-8).
    #[error("{0}")]
    Import(#[from] ImportError),

    #[error("Failed to export CSV: {0}")]
    Export(#[from] ExportError),

    #[error("Failed to read upload: {0}")]
    Multipart(#[from] MultipartError),

    /// Store failure on a read path.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl ServerError {
    /// Map error to HTTP status code
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Import(_) => StatusCode::BAD_REQUEST,
            Self::Multipart(err) => err.status(),
            Self::NotFound(_) | Self::Database(DatabaseError::NoResult) => StatusCode::NOT_FOUND,
            Self::Export(_) | Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ServerError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(format!("Invalid insight id: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ServerError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(format!("Invalid query string: {}", rejection.body_text()))
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
