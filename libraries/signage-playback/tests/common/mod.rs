//! Test doubles for the playback engine
#![allow(dead_code)]

use async_trait::async_trait;
use signage_core::{
    PlayerStatus, Result, SignageError, StorageLayout, Video, VideoPlayer, VideoRepository,
};
use signage_playback::{PlaybackConfig, PlaybackService};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::Instant;

// ===== Player =====

/// Player that replays a fixed status script after every `play`
///
/// Each `status()` call consumes one entry of the script; once it runs out
/// the player keeps reporting `then`.
pub struct ScriptedPlayer {
    script: Vec<PlayerStatus>,
    then: PlayerStatus,
    accept: bool,
    panic_next_status: AtomicBool,
    state: Mutex<PlayerState>,
}

#[derive(Default)]
struct PlayerState {
    remaining: VecDeque<PlayerStatus>,
    current: Option<PlayerStatus>,
    plays: Vec<(PathBuf, Instant)>,
    stops: usize,
}

impl ScriptedPlayer {
    pub fn new(script: Vec<PlayerStatus>, then: PlayerStatus) -> Self {
        Self {
            script,
            then,
            accept: true,
            panic_next_status: AtomicBool::new(false),
            state: Mutex::new(PlayerState::default()),
        }
    }

    /// Reports `Playing` for `ticks` polls, then `Ended`
    pub fn playing_then_ended(ticks: usize) -> Self {
        Self::new(vec![PlayerStatus::Playing; ticks], PlayerStatus::Ended)
    }

    /// Never reaches a terminal state
    pub fn playing_forever() -> Self {
        Self::new(Vec::new(), PlayerStatus::Playing)
    }

    /// Refuses every `play` call
    pub fn refusing() -> Self {
        Self {
            accept: false,
            ..Self::playing_forever()
        }
    }

    /// The next `status()` call panics instead of answering
    pub fn panic_on_next_status(&self) {
        self.panic_next_status.store(true, Ordering::SeqCst);
    }

    pub fn plays(&self) -> Vec<(PathBuf, Instant)> {
        self.state.lock().unwrap().plays.clone()
    }

    pub fn play_count(&self) -> usize {
        self.state.lock().unwrap().plays.len()
    }

    pub fn stop_count(&self) -> usize {
        self.state.lock().unwrap().stops
    }

    /// Time between the first and second `play` calls
    pub fn gap_between_first_plays(&self) -> Duration {
        let plays = self.plays();
        assert!(plays.len() >= 2, "expected two plays, got {}", plays.len());
        plays[1].1 - plays[0].1
    }
}

impl VideoPlayer for ScriptedPlayer {
    fn play(&self, path: &Path) -> bool {
        let mut state = self.state.lock().unwrap();
        state.plays.push((path.to_path_buf(), Instant::now()));

        if !self.accept {
            return false;
        }

        state.remaining = self.script.iter().copied().collect();
        state.current = Some(PlayerStatus::Opening);
        true
    }

    fn stop(&self) {
        let mut state = self.state.lock().unwrap();
        state.stops += 1;
        state.remaining.clear();
        state.current = Some(PlayerStatus::Stopped);
    }

    fn status(&self) -> PlayerStatus {
        // Checked before locking so the panic does not poison the state
        if self.panic_next_status.swap(false, Ordering::SeqCst) {
            panic!("player backend crashed");
        }

        let mut state = self.state.lock().unwrap();
        match state.current {
            None => PlayerStatus::Idle,
            Some(PlayerStatus::Stopped) => PlayerStatus::Stopped,
            Some(_) => state.remaining.pop_front().unwrap_or(self.then),
        }
    }
}

// ===== Repository =====

/// In-memory repository with controllable sync behavior
#[derive(Default)]
pub struct MockRepository {
    videos: Mutex<Vec<Video>>,
    fail_sync: AtomicBool,
    panic_next_sync: AtomicBool,
    sync_delay: Option<Duration>,
    sync_calls: AtomicUsize,
    get_calls: AtomicUsize,
}

impl MockRepository {
    pub fn with_videos(videos: Vec<Video>) -> Self {
        Self {
            videos: Mutex::new(videos),
            ..Self::default()
        }
    }

    /// Every `sync_videos` call hangs for `delay` before succeeding
    pub fn stuck_in_sync(videos: Vec<Video>, delay: Duration) -> Self {
        Self {
            videos: Mutex::new(videos),
            sync_delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn set_videos(&self, videos: Vec<Video>) {
        *self.videos.lock().unwrap() = videos;
    }

    pub fn set_fail_sync(&self, fail: bool) {
        self.fail_sync.store(fail, Ordering::SeqCst);
    }

    /// The next `sync_videos` call panics
    pub fn panic_on_next_sync(&self) {
        self.panic_next_sync.store(true, Ordering::SeqCst);
    }

    pub fn sync_calls(&self) -> usize {
        self.sync_calls.load(Ordering::SeqCst)
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VideoRepository for MockRepository {
    async fn get_videos(&self) -> Vec<Video> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.videos.lock().unwrap().clone()
    }

    async fn sync_videos(&self) -> Result<()> {
        self.sync_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.sync_delay {
            tokio::time::sleep(delay).await;
        }

        if self.panic_next_sync.swap(false, Ordering::SeqCst) {
            panic!("repository backend crashed");
        }

        if self.fail_sync.load(Ordering::SeqCst) {
            return Err(SignageError::sync("remote unreachable"));
        }

        Ok(())
    }
}

// ===== Fixtures =====

/// Temporary signage install: storage layout plus a folder of video files
pub struct Fixture {
    pub root: TempDir,
    pub storage: StorageLayout,
}

impl Fixture {
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        let storage = StorageLayout::new(root.path().join("videos"), root.path().join("cache"));
        std::fs::create_dir_all(&storage.videos_dir).unwrap();
        Self { root, storage }
    }

    /// Write a small file and describe it as a video
    pub fn video(&self, id: &str) -> Video {
        let path = self.storage.videos_dir.join(format!("{id}.mp4"));
        std::fs::write(&path, id.as_bytes()).unwrap();
        Video::new(id, format!("{id}.mp4"), path)
    }

    /// Describe a video whose file does not exist
    pub fn missing_video(&self, id: &str) -> Video {
        let path = self.storage.videos_dir.join(format!("{id}.mp4"));
        Video::new(id, format!("{id}.mp4"), path)
    }

    pub fn service(
        &self,
        repository: Arc<MockRepository>,
        player: Arc<ScriptedPlayer>,
        config: PlaybackConfig,
    ) -> PlaybackService {
        PlaybackService::new(repository, player, self.storage.clone(), config)
    }
}

/// Default timing with syncs far enough apart to stay out of the way
pub fn quiet_sync_config() -> PlaybackConfig {
    PlaybackConfig {
        sync_interval: Duration::from_secs(3600),
        ..PlaybackConfig::default()
    }
}
