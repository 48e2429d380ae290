/// Collaborator traits for Signage Player
use crate::error::Result;
use crate::types::{PlayerStatus, Video};
use async_trait::async_trait;
use std::path::Path;

/// Source of videos
///
/// Implementers know where videos live (a local folder, a remote service)
/// and how to bring the local copy up to date.
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// List the videos currently available locally
    ///
    /// Never fails across this boundary: implementers log their errors and
    /// return an empty list instead.
    async fn get_videos(&self) -> Vec<Video>;

    /// Synchronize the local copy with the remote source
    ///
    /// May download or delete files as a side effect.
    ///
    /// # Errors
    /// Returns an error if the remote source cannot be reached or the local
    /// state cannot be updated
    async fn sync_videos(&self) -> Result<()>;
}

/// Video playback backend
///
/// Implementers drive an actual media player. Calls are expected to return
/// quickly; state is observed by polling [`VideoPlayer::status`].
pub trait VideoPlayer: Send + Sync {
    /// Start playing the file at `path`
    ///
    /// Returns `false` if playback could not be started.
    fn play(&self, path: &Path) -> bool;

    /// Stop playback immediately
    fn stop(&self);

    /// Current player state
    ///
    /// Must not panic; implementers report `PlayerStatus::Idle` when the
    /// state cannot be determined.
    fn status(&self) -> PlayerStatus;

    /// Whether the player is opening, buffering or playing
    fn is_playing(&self) -> bool {
        self.status().is_active()
    }
}
