//! Error types for table preparation.

use thiserror::Error;

/// Errors that can occur while preparing a table.
#[derive(Debug, Error)]
pub enum PrepareError {
    /// A date column contained a value that does not match the expected
    /// pattern. This is a hard error by contract.
    #[error("failed to parse column '{column}' as a date: {message}")]
    DateParse { column: String, message: String },

    /// The join key column is missing from the main or lookup table.
    #[error("join key column '{column}' not found")]
    MissingJoinKey { column: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for PrepareError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for preparation operations.
pub type Result<T> = std::result::Result<T, PrepareError>;
