//! Error types for the projection engine
//!
//! The engine has a single failure class: the caller handed it an input
//! outside the calculator's domain. Every variant below aborts the whole
//! calculation for that mode; there are no partial results.

use thiserror::Error;

/// Invalid-input errors raised before any computation runs
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// The request could not be read as a calculation request
    /// (missing required field, wrong type, unknown mode or option)
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A field parsed but is not a finite number
    #[error("field '{field}' must be a finite number")]
    NonNumeric {
        /// Name of the offending field
        field: &'static str,
    },

    /// A field is numeric but outside the calculator's domain
    #[error("field '{field}' is out of range: {reason}")]
    OutOfRange {
        /// Name of the offending field
        field: &'static str,
        /// What the field must satisfy
        reason: &'static str,
    },
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::InvalidRequest(err.to_string())
    }
}

/// Errors raised while loading preset tables from disk
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open preset file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed preset row: {0}")]
    Csv(#[from] csv::Error),

    #[error("preset '{name}' is invalid: {source}")]
    Invalid {
        name: String,
        #[source]
        source: EngineError,
    },
}
