//! Entity structs for the insight domain.
//!
//! `Insight` maps to the `insights` table. Its writable fields live in
//! `InsightData`, which is flattened into the JSON shape so API clients see a
//! single camelCase object.

mod insight;

pub use insight::{Insight, InsightData, NO_MAINTENANCE_DATE, retain_non_blank};
