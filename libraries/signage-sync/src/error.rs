use signage_core::SignageError;
use thiserror::Error;

/// Errors that can occur while listing or syncing videos
#[derive(Error, Debug)]
pub enum SyncError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Server error ({status}) for {url}")]
    ServerError { status: u16, url: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Manifest or metadata could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Manifest entry cannot be used as-is
    #[error("Invalid manifest entry: {0}")]
    InvalidEntry(String),

    /// Downloaded content does not match the advertised checksum
    #[error("Checksum mismatch for {name}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    /// Local storage could not be prepared
    #[error("Storage error: {0}")]
    Storage(String),

    /// Source directory is missing
    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    /// Blocking task failed to complete
    #[error("Background task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, SyncError>;

impl From<tokio::task::JoinError> for SyncError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Task(e.to_string())
    }
}

impl From<SyncError> for SignageError {
    fn from(e: SyncError) -> Self {
        match e {
            SyncError::Io(io) => Self::Io(io),
            SyncError::Storage(msg) => Self::storage(msg),
            other => Self::sync(other.to_string()),
        }
    }
}
