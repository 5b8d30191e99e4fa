//! Error types for newsclip
//!
//! One fatal-error taxonomy for the whole pipeline. Per-record problems
//! (bad row shape, unparseable timestamp) are not errors: they are modeled
//! as skip outcomes in the sync crate and never abort a run.

use thiserror::Error;

/// Result type alias for newsclip operations
pub type Result<T> = std::result::Result<T, NewsclipError>;

/// Main error type for newsclip
#[derive(Error, Debug)]
pub enum NewsclipError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Destination bucket '{bucket}' is unavailable: {reason}")]
    BucketAccess { bucket: String, reason: String },

    #[error("Source sheet '{sheet}' could not be read: {reason}")]
    SourceUnavailable { sheet: String, reason: String },

    #[error("Source sheet '{0}' contains no rows")]
    SourceEmpty(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl NewsclipError {
    /// Wrap a backend failure that occurred while touching the destination
    /// bucket.
    pub fn bucket_access(bucket: impl Into<String>, reason: impl ToString) -> Self {
        Self::BucketAccess {
            bucket: bucket.into(),
            reason: reason.to_string(),
        }
    }

    /// Wrap a backend failure that occurred while reading the source sheet.
    pub fn source_unavailable(sheet: impl Into<String>, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            sheet: sheet.into(),
            reason: reason.to_string(),
        }
    }
}
