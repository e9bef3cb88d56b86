//! The record store seam.
//!
//! The CSV importer and exporter only need two operations from persistence.
//! `insight-db` implements this trait for its libSQL handle; tests use
//! in-memory implementations.

use std::future::Future;

use crate::entities::{Insight, InsightData};

/// Minimal persistence surface used by bulk import and export.
pub trait InsightStore {
    /// Error raised by the backing store. Its `Display` text is reported
    /// verbatim as a row error when an insert fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist one insight and return it with its assigned id.
    fn insert(
        &self,
        data: &InsightData,
    ) -> impl Future<Output = Result<Insight, Self::Error>> + Send;

    /// Every stored insight, ordered by id.
    fn select_all(&self) -> impl Future<Output = Result<Vec<Insight>, Self::Error>> + Send;
}
