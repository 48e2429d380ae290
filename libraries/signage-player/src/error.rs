use signage_core::SignageError;
use thiserror::Error;

/// Errors that can occur while setting up the player
#[derive(Error, Debug)]
pub enum PlayerError {
    /// Player program is neither an existing path nor on `PATH`
    #[error("Player program not found: {0}")]
    ProgramNotFound(String),

    /// Player process could not be started
    #[error("Failed to start player: {0}")]
    Spawn(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PlayerError>;

impl From<PlayerError> for SignageError {
    fn from(e: PlayerError) -> Self {
        Self::player(e.to_string())
    }
}
