//! # insight-csv
//!
//! Bulk CSV import and export for insight records.
//!
//! Both directions share one ordered column table ([`schema::COLUMNS`]):
//! the importer decodes each physical line with [`decode::decode_line`] and
//! maps fields positionally through the table, the exporter renders every
//! stored record through the same table.
//!
//! Import is deliberately forgiving inside a row (bad counts and list cells
//! fall back to defaults) and strict about the row as a whole (too few
//! columns or a blank subject/insight id rejects the row). One bad row never
//! aborts the batch.

pub mod decode;
pub mod error;
pub mod export;
pub mod import;
pub mod lenient;
pub mod schema;

#[cfg(test)]
mod test_support;

pub use error::{ExportError, ImportError, RowError};
pub use export::{BOM, export_document, render_document};
pub use import::{ImportOptions, ImportReport, import_document, import_upload, map_row};
