//! Playlist sequencing
//!
//! Round-robin over the videos in insertion order, or uniform random picks
//! when shuffled.

use crate::types::Video;
use rand::seq::SliceRandom;
use rand::thread_rng;

/// Ordered set of videos with a round-robin cursor
///
/// The playlist has no internal synchronization. It is meant to be owned by
/// one writer at a time and replaced as a whole when the video set changes.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    /// Videos in playback order
    videos: Vec<Video>,

    /// Round-robin position, only used when not shuffled
    cursor: usize,

    /// Pick random videos instead of walking the cursor
    shuffle: bool,
}

impl Playlist {
    /// Create a non-shuffled playlist starting at the first video
    pub fn new(videos: Vec<Video>) -> Self {
        Self {
            videos,
            cursor: 0,
            shuffle: false,
        }
    }

    /// Enable or disable shuffle
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Get the next video to play
    ///
    /// With shuffle enabled every call is an independent uniform pick, so
    /// repeats are possible and the cursor is left alone. Otherwise returns
    /// the video under the cursor and advances it, wrapping at the end.
    pub fn next(&mut self) -> Option<Video> {
        if self.videos.is_empty() {
            return None;
        }

        if self.shuffle {
            return self.videos.choose(&mut thread_rng()).cloned();
        }

        // `remove` may have left the cursor past the end
        if self.cursor >= self.videos.len() {
            self.cursor = 0;
        }

        let video = self.videos[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.videos.len();
        Some(video)
    }

    /// Video the round-robin cursor handed out last
    ///
    /// Before the first call to [`Playlist::next`] this is the last video,
    /// since the cursor sits right after it on the wrap-around.
    pub fn last_served(&self) -> Option<&Video> {
        if self.videos.is_empty() {
            return None;
        }

        let cursor = if self.cursor >= self.videos.len() {
            0
        } else {
            self.cursor
        };
        let index = (cursor + self.videos.len() - 1) % self.videos.len();
        self.videos.get(index)
    }

    /// Place the cursor right after the video with `id`
    ///
    /// Leaves the cursor alone when no video has that id.
    #[must_use]
    pub fn resume_after(mut self, id: &str) -> Self {
        if let Some(index) = self.videos.iter().position(|v| v.id == id) {
            self.cursor = (index + 1) % self.videos.len();
        }
        self
    }

    /// Append a video to the end of the playlist
    pub fn add(&mut self, video: Video) {
        self.videos.push(video);
    }

    /// Remove every video with the given id
    ///
    /// The cursor keeps its numeric value and may end up past the end, in
    /// which case the next call to [`Playlist::next`] wraps to the start.
    pub fn remove(&mut self, id: &str) {
        self.videos.retain(|v| v.id != id);
    }

    /// Find a video by id
    pub fn find(&self, id: &str) -> Option<&Video> {
        self.videos.iter().find(|v| v.id == id)
    }

    /// Number of videos
    pub fn len(&self) -> usize {
        self.videos.len()
    }

    /// Whether the playlist has no videos
    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    /// Current round-robin position
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether shuffle is enabled
    pub fn is_shuffled(&self) -> bool {
        self.shuffle
    }

    /// All videos in playback order
    pub fn videos(&self) -> &[Video] {
        &self.videos
    }
}
