pub(crate) mod helpers {
    use std::sync::Mutex;

    use chrono::Utc;
    use insight_core::entities::{Insight, InsightData};
    use insight_core::store::InsightStore;

    use crate::schema::{COLUMN_COUNT, headers};

    #[derive(Debug, thiserror::Error)]
    pub enum MemoryError {
        #[error("UNIQUE constraint failed: insights.insight_id")]
        Rejected,
        #[error("store unavailable")]
        Unavailable,
    }

    /// Vec-backed store. Inserts of `reject_insight_id` fail; reads fail when
    /// `fail_reads` is set.
    #[derive(Default)]
    pub struct MemoryStore {
        pub rows: Mutex<Vec<Insight>>,
        pub reject_insight_id: Option<String>,
        pub fail_reads: bool,
    }

    impl MemoryStore {
        pub fn rejecting(insight_id: &str) -> Self {
            Self {
                reject_insight_id: Some(insight_id.to_string()),
                ..Self::default()
            }
        }

        pub fn stored(&self) -> Vec<Insight> {
            self.rows.lock().unwrap().clone()
        }
    }

    impl InsightStore for MemoryStore {
        type Error = MemoryError;

        async fn insert(&self, data: &InsightData) -> Result<Insight, MemoryError> {
            if self.reject_insight_id.as_deref() == Some(data.insight_id.as_str()) {
                return Err(MemoryError::Rejected);
            }
            let mut rows = self.rows.lock().unwrap();
            let now = Utc::now();
            let insight = Insight {
                id: i64::try_from(rows.len()).unwrap() + 1,
                data: data.clone(),
                created_at: now,
                updated_at: now,
            };
            rows.push(insight.clone());
            Ok(insight)
        }

        async fn select_all(&self) -> Result<Vec<Insight>, MemoryError> {
            if self.fail_reads {
                return Err(MemoryError::Unavailable);
            }
            Ok(self.stored())
        }
    }

    /// The exported header line, unquoted.
    pub fn header_line() -> String {
        headers().collect::<Vec<_>>().join(",")
    }

    /// A 34-column line with the given cells set and every other cell empty.
    pub fn csv_line(cells: &[(usize, &str)]) -> String {
        let mut fields = vec![""; COLUMN_COUNT];
        for &(idx, value) in cells {
            fields[idx] = value;
        }
        fields.join(",")
    }

    /// A minimal valid row.
    pub fn valid_line(insight_id: &str, subject: &str) -> String {
        csv_line(&[(2, subject), (3, insight_id)])
    }
}
