//! Error types for the daybook storage core
//!
//! All errors use thiserror for structured error handling.
//! Persistence failures never escape the fallback wrapper; the variants
//! here describe what went wrong before the wrapper absorbs it.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The primary store could not be opened at all (locked directory,
    /// missing permissions, unsupported environment).
    #[error("Primary store unavailable: {0}")]
    Unavailable(String),

    /// A read or write against the opened primary store failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// File exceeds the ingestion ceiling. Raised before any read.
    #[error("File too large: {name} is {size} bytes (limit {limit})")]
    FileTooLarge { name: String, size: u64, limit: u64 },

    /// Reading or encoding a file failed partway through ingestion.
    #[error("Failed to read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing to the secondary text store would exceed its quota.
    #[error("Text store quota exceeded writing {key}: {size} bytes (quota {quota})")]
    QuotaExceeded { key: String, size: usize, quota: usize },
}

pub type Result<T> = std::result::Result<T, StoreError>;
