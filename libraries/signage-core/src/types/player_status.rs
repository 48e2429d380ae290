/// Player status reported by video player backends
use serde::{Deserialize, Serialize};

/// Polled state of a video player
///
/// Mirrors the transport states most media backends expose. The playback
/// loop only consumes this value, it never sets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    /// Nothing loaded
    #[default]
    Idle,
    /// Media is being opened
    Opening,
    /// Media is buffering
    Buffering,
    /// Media is playing
    Playing,
    /// Playback paused
    Paused,
    /// Playback stopped before the end
    Stopped,
    /// Media played to the end
    Ended,
    /// Backend reported an error for the current media
    Error,
}

impl PlayerStatus {
    /// Whether the player is actively working on the current media
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Opening | Self::Buffering | Self::Playing)
    }

    /// Whether the current media is finished, one way or another
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Error | Self::Stopped)
    }

    /// Convert to string representation
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Opening => "opening",
            Self::Buffering => "buffering",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
            Self::Ended => "ended",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
