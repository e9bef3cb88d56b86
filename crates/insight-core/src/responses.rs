//! JSON response bodies returned by the HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One failed row of a CSV import.
///
/// `row` is the 1-based physical line number in the uploaded file, counting
/// the header line, so the first data row is row 2.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportRowError {
    pub row: usize,
    pub error: String,
}

/// Response from `POST /api/insights/import/csv`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub success: bool,
    pub imported: usize,
    pub errors: usize,
    pub error_details: Vec<ImportRowError>,
}

/// Response from `DELETE /api/insights/:id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteResponse {
    pub success: bool,
}

/// Response from `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    /// Seconds since the server started.
    pub uptime: f64,
}

/// Body of every non-2xx JSON response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}
