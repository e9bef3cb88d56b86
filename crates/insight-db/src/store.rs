//! [`InsightStore`] implementation backed by libSQL.

use insight_core::entities::{Insight, InsightData};
use insight_core::store::InsightStore;

use crate::InsightDb;
use crate::error::DatabaseError;

impl InsightStore for InsightDb {
    type Error = DatabaseError;

    async fn insert(&self, data: &InsightData) -> Result<Insight, DatabaseError> {
        self.create_insight(data).await
    }

    async fn select_all(&self) -> Result<Vec<Insight>, DatabaseError> {
        self.list_all().await
    }
}
