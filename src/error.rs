//! Error types for the data preparation pipeline.
//!
//! The pipeline distinguishes caller mistakes (`Configuration`), schema
//! problems (`Schema`, `UnsupportedColumnType`), and numerical failures
//! (`Transform`). Balancer implementations report through `Balancing`;
//! dataframe-level failures pass through the `Polars` wrapper.

use polars::prelude::{DataType, PolarsError};
use thiserror::Error;

/// Result alias used throughout the pipeline modules.
pub type Result<T> = std::result::Result<T, PrepError>;

/// Errors raised while preparing a dataset for training.
#[derive(Debug, Error)]
pub enum PrepError {
    /// A referenced column is missing from the dataset schema.
    #[error("schema error: {0}")]
    Schema(String),

    /// A column has a type the pipeline cannot use for feature math.
    ///
    /// Selection and correlation statistics operate on numeric and boolean
    /// columns only; anything else aborts the call rather than being
    /// silently skipped.
    #[error("unsupported column type for '{column}': {dtype} (expected numeric or boolean)")]
    UnsupportedColumnType {
        /// Name of the offending column
        column: String,
        /// Textual rendering of the column's dtype
        dtype: String,
    },

    /// A numerical operation failed during normalization, decomposition,
    /// projection, or feature-vector assembly.
    #[error("transform error: {0}")]
    Transform(String),

    /// The supplied configuration is invalid and cannot be clamped.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A balancer implementation reported a failure.
    #[error("balancing failed: {0}")]
    Balancing(String),

    /// An underlying dataframe operation failed.
    #[error(transparent)]
    Polars(#[from] PolarsError),
}

impl PrepError {
    /// Build a [`PrepError::Schema`] from anything string-like.
    pub fn schema(msg: impl Into<String>) -> Self {
        PrepError::Schema(msg.into())
    }

    /// Build a [`PrepError::Transform`] from anything string-like.
    pub fn transform(msg: impl Into<String>) -> Self {
        PrepError::Transform(msg.into())
    }

    /// Build a [`PrepError::Configuration`] from anything string-like.
    pub fn configuration(msg: impl Into<String>) -> Self {
        PrepError::Configuration(msg.into())
    }

    /// Build a [`PrepError::Balancing`] from anything string-like.
    pub fn balancing(msg: impl Into<String>) -> Self {
        PrepError::Balancing(msg.into())
    }

    /// Build an [`PrepError::UnsupportedColumnType`] for a column/dtype pair.
    pub fn unsupported_column(column: &str, dtype: &DataType) -> Self {
        PrepError::UnsupportedColumnType {
            column: column.to_string(),
            dtype: dtype.to_string(),
        }
    }
}
