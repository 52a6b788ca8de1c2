//! Persistence error types.

use std::path::PathBuf;

use thiserror::Error;

/// Persistence operation error.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// File I/O error.
    #[error("failed to {operation} project file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file content is not valid JSON.
    #[error("project file is not valid JSON")]
    Malformed {
        #[source]
        source: serde_json::Error,
    },

    /// The JSON parses but does not look like a project document.
    #[error("project document has an unexpected shape: {reason}")]
    InvalidDocument { reason: String },

    /// The document was written by a newer build.
    #[error("project file version {found} is not supported (maximum: {max_supported})")]
    UnsupportedVersion { found: u32, max_supported: u32 },

    /// Serializing the in-memory project failed.
    #[error("failed to serialize project")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// Atomic write failed (temp file could not be renamed).
    #[error("failed to complete save operation to {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;
