//! Error types for normalization operations.
//!
//! This module provides the [`NormalizeError`] type for all fallible operations
//! in the crate and the [`Result`] convenience type.
//!
//! Most normalization failures are local to a single field: callers are expected
//! to omit the affected property and keep processing the rest of the record.

use thiserror::Error;

/// Error type for all normalization operations.
#[derive(Error, Debug)]
pub enum NormalizeError {
    /// The lower bound of a year range rounds to a point after its upper bound.
    #[error("Inconsistent date range in {raw:?}: {lower} is after {upper}")]
    InconsistentRange {
        /// The source text the range was built from
        raw: String,
        /// Lower bound after rounding down
        lower: String,
        /// Upper bound after rounding up
        upper: String,
    },

    /// Date components that do not form a valid ISO-8601 date.
    #[error("Invalid date in {raw:?}: {reason}")]
    InvalidDate {
        /// The source text the date was built from
        raw: String,
        /// What was wrong with it
        reason: String,
    },

    /// A range constructor was given bounds in the wrong order.
    #[error("Invalid range: {lower} is not before {upper}")]
    InvalidRange {
        /// Requested lower bound
        lower: String,
        /// Requested upper bound
        upper: String,
    },

    /// Error in a vocabulary configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error decoding upstream JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error from the underlying source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NormalizeError {
    pub(crate) fn invalid_date(raw: &str, reason: impl Into<String>) -> Self {
        NormalizeError::InvalidDate {
            raw: raw.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for [`std::result::Result`] with [`NormalizeError`].
pub type Result<T> = std::result::Result<T, NormalizeError>;
