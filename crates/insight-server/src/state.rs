//! Application state shared across handlers.

use std::time::Instant;

use insight_config::InsightsConfig;
use insight_db::InsightDb;

pub struct AppState {
    pub db: InsightDb,
    pub config: InsightsConfig,
    started_at: Instant,
}

impl AppState {
    #[must_use]
    pub fn new(db: InsightDb, config: InsightsConfig) -> Self {
        Self {
            db,
            config,
            started_at: Instant::now(),
        }
    }

    /// Seconds since the state was created.
    #[must_use]
    pub fn uptime_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}
