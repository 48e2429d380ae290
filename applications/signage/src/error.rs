/// Application error types
use signage_core::SignageError;
use signage_player::PlayerError;
use signage_sync::SyncError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error(transparent)]
    Signage(#[from] SignageError),

    #[error("Source error: {0}")]
    Sync(#[from] SyncError),

    #[error("Player error: {0}")]
    Player(#[from] PlayerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}
