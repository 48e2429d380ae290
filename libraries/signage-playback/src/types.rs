//! Status types reported by the playback service

use serde::Serialize;
use signage_core::Video;

/// Point-in-time view of the playback service
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStatus {
    /// Whether the service has been started and not stopped
    pub running: bool,

    /// Number of videos in the current playlist
    pub playlist_size: usize,

    /// Video the playback loop is currently driving
    pub current_video: Option<Video>,

    /// Whether the sync loop task is still alive
    pub sync_alive: bool,

    /// Whether the playback loop task is still alive
    pub playback_alive: bool,
}

/// How waiting on a single video ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// Player reported the end of the media
    Ended,

    /// Player reported an error
    Failed,

    /// Player reported it was stopped
    Stopped,

    /// Safety-net max wait elapsed
    TimedOut,

    /// Backing file disappeared during playback
    Invalidated,

    /// Service is shutting down
    Cancelled,
}
