//! Cross-cutting error types.
//!
//! Storage, import, and server errors are defined in their own crates. The
//! variants here can be raised by any of them.

use thiserror::Error;

/// Errors that can be raised by any insight crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A required field was blank.
    #[error("{0} is required")]
    MissingField(&'static str),
}
