//! Import and export error types.
//!
//! [`ImportError`] aborts a whole upload. [`RowError`] rejects a single row
//! and is collected into the import report instead of being propagated.

use insight_core::errors::CoreError;
use thiserror::Error;

/// Structural problems that reject an upload before any row is read.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Fewer than two non-blank lines (no header, or no data rows).
    #[error("CSV file is empty or invalid")]
    Empty,

    #[error("CSV file is not valid UTF-8: {0}")]
    NotUtf8(#[from] std::str::Utf8Error),
}

/// Why one data row was not imported. The `Display` text is what callers see.
#[derive(Debug, Error)]
pub enum RowError {
    #[error("Insufficient columns: expected {expected}, got {got}")]
    InsufficientColumns { expected: usize, got: usize },

    /// A required field was blank.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    /// The record store refused the insert; carries the store's message.
    #[error("{0}")]
    Store(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to load insights: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV write error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}
