//! Error types for the service boundary
//!
//! Upload errors are user-facing: their Display text is shown as the
//! inline field error. Persistence errors never leave the adapters, which
//! log them and carry on.

use thiserror::Error;

/// Rejected upload, surfaced as an inline form message
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UploadError {
    /// File extension outside the allow-list for this component type
    #[error("Only the following file extensions are allowed: {}", .allowed.join(", "))]
    DisallowedExtension {
        file_name: String,
        allowed: &'static [&'static str],
    },

    /// The component type holds no files at all
    #[error("{kind} components do not accept file uploads")]
    UploadsNotAccepted { kind: &'static str },
}

/// Storage failures inside a persistence adapter
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// No storage is reachable (no window, storage disabled, ...)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Stored value could not be read back
    #[error("Stored article is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// Write rejected by the storage backend (quota, private mode, ...)
    #[error("Storage write failed: {0}")]
    WriteFailed(String),
}
