//! Repository modules implementing CRUD operations.
//!
//! Each module adds methods to `InsightDb` via `impl InsightDb` blocks.

pub mod insight;
