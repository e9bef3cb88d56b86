//! # insight-core
//!
//! Core types shared by every insight crate:
//! - The `Insight` entity and its writable field set (`InsightData`)
//! - Cross-cutting error types
//! - JSON response bodies returned by the HTTP API
//! - The `InsightStore` seam used by the CSV importer and exporter

pub mod entities;
pub mod errors;
pub mod responses;
pub mod store;
