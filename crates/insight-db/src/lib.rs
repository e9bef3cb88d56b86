//! # insight-db
//!
//! libSQL record store for insight cards.
//!
//! Owns the `insights` table: schema migration on open, the CRUD and search
//! repository, the partial-update builder, and the [`InsightStore`] seam used
//! by bulk CSV import and export.
//!
//! [`InsightStore`]: insight_core::store::InsightStore

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
mod store;
#[cfg(test)]
mod test_support;
pub mod updates;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle for all insight operations.
///
/// Wraps a libSQL database and a single connection. Repository methods are
/// implemented on this type in [`repos`].
pub struct InsightDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl InsightDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let insight_db = Self { db, conn };
        insight_db.run_migrations().await?;
        tracing::debug!(path, "insight database opened");
        Ok(insight_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
