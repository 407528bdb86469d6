//! Error types for the audit crate.

use thiserror::Error;

/// Failure to write or read the audit trail.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("storage error: {0}")]
    StorageError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
