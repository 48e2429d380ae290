/// Core error types for Signage Player
use thiserror::Error;

/// Result type alias using `SignageError`
pub type Result<T> = std::result::Result<T, SignageError>;

/// Core error type for Signage Player
#[derive(Error, Debug)]
pub enum SignageError {
    /// Storage directories could not be prepared
    #[error("Storage error: {0}")]
    Storage(String),

    /// Remote synchronization failed
    #[error("Sync error: {0}")]
    Sync(String),

    /// Video player failure
    #[error("Player error: {0}")]
    Player(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SignageError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a sync error
    pub fn sync(msg: impl Into<String>) -> Self {
        Self::Sync(msg.into())
    }

    /// Create a player error
    pub fn player(msg: impl Into<String>) -> Self {
        Self::Player(msg.into())
    }
}
