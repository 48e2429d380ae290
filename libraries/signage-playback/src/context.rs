//! State shared by the service handle and its background loops

use crate::config::PlaybackConfig;
use crate::shared::SharedPlaylist;
use parking_lot::Mutex;
use signage_core::{Playlist, Video, VideoPlayer, VideoRepository};
use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub(crate) struct ServiceContext {
    pub(crate) repository: Arc<dyn VideoRepository>,
    pub(crate) player: Arc<dyn VideoPlayer>,
    pub(crate) playlist: SharedPlaylist,
    pub(crate) config: PlaybackConfig,
    running: AtomicBool,
    current_video: Mutex<Option<Video>>,
}

impl ServiceContext {
    pub(crate) fn new(
        repository: Arc<dyn VideoRepository>,
        player: Arc<dyn VideoPlayer>,
        config: PlaybackConfig,
    ) -> Self {
        Self {
            repository,
            player,
            playlist: SharedPlaylist::default(),
            config,
            running: AtomicBool::new(false),
            current_video: Mutex::new(None),
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub(crate) fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::SeqCst);
    }

    pub(crate) fn current_video(&self) -> Option<Video> {
        self.current_video.lock().clone()
    }

    pub(crate) fn set_current_video(&self, video: Option<Video>) {
        *self.current_video.lock() = video;
    }

    /// Rebuild the playlist from the repository and swap it in
    ///
    /// Round-robin continues after the video served last, so a reload does
    /// not send playback back to the first video.
    pub(crate) async fn load_videos(&self) -> usize {
        let videos = self.repository.get_videos().await;
        let count = videos.len();

        self.playlist
            .replace_resuming(Playlist::new(videos).with_shuffle(self.config.shuffle));

        info!("Loaded {} videos into playlist", count);
        count
    }
}

/// Sleep for `duration` unless shutdown is requested first
///
/// Returns `false` when woken by shutdown.
pub(crate) async fn sleep_or_cancel(duration: Duration, shutdown: &CancellationToken) -> bool {
    tokio::select! {
        () = shutdown.cancelled() => false,
        () = tokio::time::sleep(duration) => true,
    }
}

/// Best-effort text of a caught panic payload
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_message_reads_common_payloads() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");

        let payload: Box<dyn Any + Send> = Box::new(String::from("player crashed"));
        assert_eq!(panic_message(payload.as_ref()), "player crashed");

        let payload: Box<dyn Any + Send> = Box::new(42_u32);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }

    #[tokio::test(start_paused = true)]
    async fn sleep_or_cancel_wakes_on_shutdown() {
        let shutdown = CancellationToken::new();
        let trigger = shutdown.clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            trigger.cancel();
        });

        let start = tokio::time::Instant::now();
        let completed = sleep_or_cancel(Duration::from_secs(3600), &shutdown).await;

        assert!(!completed);
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn sleep_or_cancel_completes_without_shutdown() {
        let shutdown = CancellationToken::new();
        assert!(sleep_or_cancel(Duration::from_secs(5), &shutdown).await);
    }
}
