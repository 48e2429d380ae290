//! Timing configuration for the playback engine

use std::time::Duration;

/// Configuration for the playback service
///
/// Loop delays are expressed in ticks so tests can shrink the whole timing
/// model by changing `tick` alone.
#[derive(Debug, Clone)]
pub struct PlaybackConfig {
    /// Delay between two sync attempts (default: 30s)
    pub sync_interval: Duration,

    /// Pick random videos instead of round-robin (default: false)
    pub shuffle: bool,

    /// Loop time unit, also the player poll period (default: 1s)
    pub tick: Duration,

    /// Ticks to wait before retrying an empty playlist (default: 5)
    pub empty_playlist_ticks: u32,

    /// Ticks to wait after a missing file or a failed start (default: 1)
    pub retry_ticks: u32,

    /// Safety-net bound on waiting for a single video (default: 300)
    pub max_wait_ticks: u32,

    /// How long `stop()` waits for each loop (default: 5s)
    pub join_timeout: Duration,
}

impl PlaybackConfig {
    /// Delay applied when the playlist is empty
    pub fn empty_playlist_delay(&self) -> Duration {
        self.tick * self.empty_playlist_ticks
    }

    /// Delay applied after a per-video failure
    pub fn retry_delay(&self) -> Duration {
        self.tick * self.retry_ticks
    }

    /// Longest time a single video may keep the loop waiting
    pub fn max_wait(&self) -> Duration {
        self.tick * self.max_wait_ticks
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            sync_interval: Duration::from_secs(30),
            shuffle: false,
            tick: Duration::from_secs(1),
            empty_playlist_ticks: 5,
            retry_ticks: 1,
            max_wait_ticks: 300,
            join_timeout: Duration::from_secs(5),
        }
    }
}
