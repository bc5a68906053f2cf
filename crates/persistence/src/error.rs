//! # Persistence Errors
//!
//! Error types for the document store, wrapping IO and serde_json errors.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Persistence layer errors
#[derive(Debug, Error)]
pub enum PersistenceError {
    // === File errors ===
    #[error("File I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt document {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    // === Record errors ===
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed {collection} record #{index}: {reason}")]
    MalformedRecord {
        collection: String,
        index: usize,
        reason: String,
    },
}

/// Result type alias for PersistenceError
pub type PersistenceResult<T> = Result<T, PersistenceError>;

impl PersistenceError {
    /// Wrap an IO error with the file it happened on
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Create Corrupt error
    pub fn corrupt(path: &Path, reason: &str) -> Self {
        Self::Corrupt {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Create MalformedRecord error
    pub fn malformed(collection: &str, index: usize, reason: impl ToString) -> Self {
        Self::MalformedRecord {
            collection: collection.to_string(),
            index,
            reason: reason.to_string(),
        }
    }

    /// Store unreadable or unwritable: state may only be durable in memory
    pub fn is_file_io(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Corrupt { .. })
    }

    /// A single bad record, recoverable during bulk load
    pub fn is_malformed_record(&self) -> bool {
        matches!(self, Self::MalformedRecord { .. })
    }
}
