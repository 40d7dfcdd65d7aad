//! Error types for the atesta-core library.

use thiserror::Error;

/// Main error type for the atesta library.
#[derive(Error, Debug)]
pub enum AtestaError {
    /// Field extraction or correction-submission error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Correction store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to field extraction and correction submissions.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A corrected mapping is missing a required field key.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// Field validation failed.
    #[error("validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },
}

/// Errors related to correction-log persistence.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to serialize the correction log.
    #[error("failed to serialize correction log: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Failed to write the correction log to disk.
    #[error("failed to persist correction log to {path}: {source}")]
    Persist {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for the atesta library.
pub type Result<T> = std::result::Result<T, AtestaError>;
