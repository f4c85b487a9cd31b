//! Error types for the stowage engine.

use thiserror::Error;

/// Result type alias for stowage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised for caller bugs.
///
/// Expected operational outcomes (an item that cannot pass the container
/// door, a weight cap being reached, an exhausted container plan,
/// cooperative cancellation) are never errors; they are reported through
/// [`PackResult`](crate::result::PackResult) fields and residual lists.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid cargo declaration (non-positive dimensions, zero quantity,
    /// duplicate ids).
    #[error("Invalid cargo: {0}")]
    InvalidCargo(String),

    /// Invalid container specification.
    #[error("Invalid container: {0}")]
    InvalidContainer(String),

    /// Invalid planner configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
