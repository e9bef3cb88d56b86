//! Shared test utilities for insight-db unit tests.

pub(crate) mod helpers {
    use insight_core::entities::InsightData;

    use crate::InsightDb;

    /// Create an in-memory database with migrations applied.
    pub async fn test_db() -> InsightDb {
        InsightDb::open_local(":memory:").await.unwrap()
    }

    /// Minimal valid insight payload.
    pub fn sample_data(insight_id: &str, subject: &str) -> InsightData {
        InsightData {
            subject: subject.to_string(),
            insight_id: insight_id.to_string(),
            status: "active".to_string(),
            ..Default::default()
        }
    }
}
