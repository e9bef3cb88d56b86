//! Bulk CSV import.
//!
//! The upload is split into physical lines, the first non-blank line is
//! treated as the header and skipped, and every remaining line becomes one
//! candidate record. Rows are inserted one at a time in file order; a row
//! that fails is recorded in the report and the import moves on.

use insight_core::entities::{Insight, InsightData};
use insight_core::responses::{ImportResponse, ImportRowError};
use insight_core::store::InsightStore;

use crate::decode::decode_line;
use crate::error::{ImportError, RowError};
use crate::export::BOM;
use crate::schema::{COLUMN_COUNT, COLUMNS, apply, decode_cell};

/// Tunables for an import run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    /// Lines longer than this many characters are logged as suspicious.
    pub long_line_warn_chars: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            long_line_warn_chars: 5000,
        }
    }
}

/// Outcome of an import: what was stored and which rows were rejected.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub imported: Vec<Insight>,
    pub errors: Vec<ImportRowError>,
}

impl ImportReport {
    /// The counts-plus-details body returned to API clients.
    #[must_use]
    pub fn summary(&self) -> ImportResponse {
        ImportResponse {
            success: true,
            imported: self.imported.len(),
            errors: self.errors.len(),
            error_details: self.errors.clone(),
        }
    }
}

/// Import an uploaded file's raw bytes.
///
/// # Errors
///
/// Returns `ImportError::NotUtf8` if the bytes are not UTF-8 text, otherwise
/// see [`import_document`].
pub async fn import_upload<S>(
    store: &S,
    bytes: &[u8],
    options: &ImportOptions,
) -> Result<ImportReport, ImportError>
where
    S: InsightStore + Sync,
{
    let text = std::str::from_utf8(bytes)?;
    import_document(store, text, options).await
}

/// Import a CSV document into `store`.
///
/// Row numbers in the report are 1-based physical line numbers, so the first
/// data row under the header is row 2. Blank lines are skipped without
/// shifting later row numbers.
///
/// # Errors
///
/// Returns `ImportError::Empty` when the document has fewer than two
/// non-blank lines. Per-row failures never surface here; they are collected
/// in [`ImportReport::errors`].
pub async fn import_document<S>(
    store: &S,
    text: &str,
    options: &ImportOptions,
) -> Result<ImportReport, ImportError>
where
    S: InsightStore + Sync,
{
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let lines: Vec<(usize, &str)> = text
        .split('\n')
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.strip_suffix('\r').unwrap_or(line)))
        .filter(|(_, line)| !line.trim().is_empty())
        .collect();

    let Some((_header, rows)) = lines.split_first() else {
        return Err(ImportError::Empty);
    };
    if rows.is_empty() {
        return Err(ImportError::Empty);
    }

    let mut report = ImportReport::default();
    for &(row, line) in rows {
        let chars = line.chars().count();
        if chars > options.long_line_warn_chars {
            tracing::warn!(row, chars, "unusually long CSV line");
        }

        let outcome = match map_row(line) {
            Ok(data) => store
                .insert(&data)
                .await
                .map_err(|e| RowError::Store(e.to_string())),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(insight) => report.imported.push(insight),
            Err(err) => {
                tracing::debug!(row, error = %err, "CSV row rejected");
                report.errors.push(ImportRowError {
                    row,
                    error: err.to_string(),
                });
            }
        }
    }

    tracing::info!(
        imported = report.imported.len(),
        failed = report.errors.len(),
        "CSV import finished"
    );
    Ok(report)
}

/// Decode one data line into a validated insight payload.
///
/// Columns beyond the 34th are ignored.
///
/// # Errors
///
/// Returns `RowError::InsufficientColumns` for short rows and
/// `RowError::Invalid` when subject or insight id is blank.
pub fn map_row(line: &str) -> Result<InsightData, RowError> {
    let fields = decode_line(line);
    if fields.len() != COLUMN_COUNT {
        tracing::warn!(
            expected = COLUMN_COUNT,
            got = fields.len(),
            "unexpected CSV column count"
        );
    }
    if fields.len() < COLUMN_COUNT {
        return Err(RowError::InsufficientColumns {
            expected: COLUMN_COUNT,
            got: fields.len(),
        });
    }

    let mut data = InsightData::default();
    for (column, raw) in COLUMNS.iter().zip(&fields) {
        apply(&mut data, column.field, decode_cell(column.rule, raw));
    }
    data.drop_blank_story_images();
    data.validate_required()?;
    Ok(data)
}
