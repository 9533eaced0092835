//! Error types for the catalog crate.
//!
//! All load-time failures are fatal: the store never becomes ready with a
//! partially loaded or inconsistent catalog.

use thiserror::Error;

/// Errors that can occur while loading the catalog and the cluster model.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading an artifact
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A record in the catalog CSV couldn't be parsed
    #[error("Parse error at record {record} in {file}: {reason}")]
    ParseError {
        file: String,
        record: usize,
        reason: String,
    },

    /// The model artifact couldn't be deserialized
    #[error("Invalid model artifact {file}: {reason}")]
    ModelError { file: String, reason: String },

    /// Catalog row count and model label count disagree.
    ///
    /// This is the load integrity invariant: every row must have exactly one
    /// cluster label, so a mismatch means the two artifacts were produced
    /// from different training runs.
    #[error("Dataset has {rows} rows but model has {labels} labels")]
    RowCountMismatch { rows: usize, labels: usize },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
