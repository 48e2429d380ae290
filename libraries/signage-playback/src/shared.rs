//! Playlist cell shared between the sync and playback loops

use parking_lot::Mutex;
use signage_core::{Playlist, Video};
use std::sync::Arc;

/// Handle to the orchestrator's current playlist
///
/// Readers lock it for the duration of a single `next()` call. Writers never
/// edit the playlist in place: they swap in a complete new one, so a reader
/// sees either the old playlist or the new one, never a mix.
#[derive(Debug, Clone, Default)]
pub struct SharedPlaylist {
    inner: Arc<Mutex<Playlist>>,
}

impl SharedPlaylist {
    /// Wrap an initial playlist
    pub fn new(playlist: Playlist) -> Self {
        Self {
            inner: Arc::new(Mutex::new(playlist)),
        }
    }

    /// Next video from the current playlist
    pub fn next(&self) -> Option<Video> {
        self.inner.lock().next()
    }

    /// Replace the whole playlist, returning the previous one
    pub fn replace(&self, playlist: Playlist) -> Playlist {
        std::mem::replace(&mut *self.inner.lock(), playlist)
    }

    /// Replace the whole playlist, continuing the round-robin where the
    /// current one left off
    ///
    /// The new playlist starts after the video the current one served last.
    /// If that video is gone, the new playlist starts from the top.
    pub fn replace_resuming(&self, playlist: Playlist) -> Playlist {
        let mut current = self.inner.lock();
        let playlist = match current.last_served() {
            Some(last) => playlist.resume_after(&last.id),
            None => playlist,
        };
        std::mem::replace(&mut *current, playlist)
    }

    /// Number of videos in the current playlist
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether the current playlist is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Copy of the current playlist
    pub fn snapshot(&self) -> Playlist {
        self.inner.lock().clone()
    }
}
