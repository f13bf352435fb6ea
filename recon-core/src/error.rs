//! Error types for the reconciliation core
//!
//! Business outcomes (DUPLICATE, IGNORED, INCOMPLETE, ...) are never
//! errors; they travel as [`crate::types::EventStatus`] values. Errors
//! here signal programming defects or bad configuration.

use thiserror::Error;

/// Result type for reconciliation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Reconciliation core errors
#[derive(Error, Debug)]
pub enum Error {
    /// Internal invariant violation (dedupe index out of sync, dangling
    /// supersede pointer). Indicates a defect in the store, not bad input.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Metrics registration error
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
