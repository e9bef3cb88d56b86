//! Bulk CSV export.

use insight_core::entities::Insight;
use insight_core::store::InsightStore;

use crate::error::ExportError;
use crate::schema::{COLUMNS, headers, render};

/// Byte-order mark prefixed to exported documents so spreadsheet tools pick
/// UTF-8 for the Japanese headers.
pub const BOM: char = '\u{feff}';

/// Export every stored insight as a CSV document.
///
/// # Errors
///
/// Returns `ExportError::Store` if the records cannot be read, or a write
/// error from [`render_document`].
pub async fn export_document<S>(store: &S) -> Result<String, ExportError>
where
    S: InsightStore + Sync,
{
    let insights = store
        .select_all()
        .await
        .map_err(|e| ExportError::Store(Box::new(e)))?;
    let document = render_document(&insights)?;
    tracing::info!(rows = insights.len(), "CSV export rendered");
    Ok(document)
}

/// Render insights as a BOM-prefixed CSV document: one header line, then
/// one line per insight in the given order. Every field is quoted and null
/// scalars are written as empty fields.
///
/// # Errors
///
/// Returns `ExportError` if the CSV writer fails.
pub fn render_document(insights: &[Insight]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(headers())?;
    for insight in insights {
        writer.write_record(
            COLUMNS
                .iter()
                .map(|column| render(insight, column.field).unwrap_or_default()),
        )?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    let body = String::from_utf8(bytes)?;
    Ok(format!("{BOM}{body}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::{ImportOptions, import_document};
    use crate::test_support::helpers::MemoryStore;
    use insight_core::entities::InsightData;
    use pretty_assertions::assert_eq;

    fn sample(insight_id: &str) -> InsightData {
        InsightData {
            subject: format!("Subject for {insight_id}"),
            insight_id: insight_id.to_string(),
            status: "active".into(),
            start_date: Some("2026-04-01".into()),
            target_banks: vec!["bank-a".into(), "bank-b".into()],
            logic_formula: "balance < 0, \"overdraft\"".into(),
            score: None,
            display_count: 3,
            story_images: vec!["a.png".into()],
            remarks: "備考あり".into(),
            ..InsightData::default()
        }
    }

    async fn seeded(ids: &[&str]) -> MemoryStore {
        let store = MemoryStore::default();
        for id in ids {
            store.insert(&sample(id)).await.unwrap();
        }
        store
    }

    #[test]
    fn empty_export_is_bom_and_header() {
        let document = render_document(&[]).unwrap();
        assert!(document.starts_with(BOM));
        let lines: Vec<&str> = document.trim_start_matches(BOM).lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with(r#""ID","作成番号","インサイト件名""#));
        assert!(lines[0].ends_with(r#""備考","更新者""#));
    }

    #[tokio::test]
    async fn rows_are_fully_quoted_in_store_order() {
        let store = seeded(&["INS-1", "INS-2"]).await;
        let document = export_document(&store).await.unwrap();
        let lines: Vec<&str> = document.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(
            lines[1].starts_with(r#""1","1","Subject for INS-1","INS-1","active","2026-04-01","""#)
        );
        assert!(lines[2].starts_with(r#""2","1","Subject for INS-2""#));
        assert!(lines[1].contains(r#""[""bank-a"",""bank-b""]""#));
        assert!(lines[1].contains(r#""balance < 0, ""overdraft""""#));
    }

    #[tokio::test]
    async fn export_then_import_reproduces_records() {
        let source = seeded(&["INS-1", "INS-2"]).await;
        let document = export_document(&source).await.unwrap();

        let target = MemoryStore::default();
        let report = import_document(&target, &document, &ImportOptions::default())
            .await
            .unwrap();

        assert!(report.errors.is_empty());
        let original: Vec<InsightData> = source.stored().into_iter().map(|i| i.data).collect();
        let imported: Vec<InsightData> = report.imported.into_iter().map(|i| i.data).collect();
        assert_eq!(imported, original);
    }

    #[tokio::test]
    async fn store_read_failure_is_an_export_error() {
        let store = MemoryStore {
            fail_reads: true,
            ..MemoryStore::default()
        };
        let err = export_document(&store).await.unwrap_err();
        assert!(matches!(err, ExportError::Store(_)));
        assert_eq!(err.to_string(), "Failed to load insights: store unavailable");
    }
}
