//! # insight-server
//!
//! axum HTTP API over the insight record store: CRUD and search under
//! `/api/insights`, bulk CSV import and export, and a health check.
//!
//! The router is built by [`routes::build_router`] from a shared
//! [`AppState`]; the `insightd` binary wires configuration, logging and the
//! listener around it.

pub mod error;
pub mod requests;
pub mod routes;
pub mod state;

pub use error::{Result, ServerError};
pub use state::AppState;
