//! Playback service: owns the playlist and the two background loops

use crate::config::PlaybackConfig;
use crate::context::ServiceContext;
use crate::shared::SharedPlaylist;
use crate::types::ServiceStatus;
use crate::{playback_loop, sync_loop};
use parking_lot::Mutex;
use signage_core::{Result, StorageLayout, VideoPlayer, VideoRepository};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Handles to the running loops
struct LoopTasks {
    shutdown: CancellationToken,
    sync: JoinHandle<()>,
    playback: JoinHandle<()>,
}

/// Orchestrates synchronization and playback
///
/// ```text
/// start() ──> ensure storage dirs ──> initial load ──┬──> sync loop
///                                                    └──> playback loop
/// stop()  ──> clear running, stop player ──> join both (bounded)
/// ```
///
/// The two loops only share the playlist cell, the running flag, and the
/// shutdown token.
pub struct PlaybackService {
    ctx: Arc<ServiceContext>,
    storage: StorageLayout,
    tasks: Mutex<Option<LoopTasks>>,
}

impl PlaybackService {
    /// Create a stopped service with an empty playlist
    pub fn new(
        repository: Arc<dyn VideoRepository>,
        player: Arc<dyn VideoPlayer>,
        storage: StorageLayout,
        config: PlaybackConfig,
    ) -> Self {
        Self {
            ctx: Arc::new(ServiceContext::new(repository, player, config)),
            storage,
            tasks: Mutex::new(None),
        }
    }

    /// Start the service
    ///
    /// Creates the storage directories, loads the playlist once, then spawns
    /// the sync and playback loops. Returns as soon as both are spawned.
    /// Calling it on a running service only logs a warning.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    /// Returns `SignageError::Storage` if the storage directories cannot be
    /// created. The service is left stopped.
    pub async fn start(&self) -> Result<()> {
        if self.tasks.lock().is_some() {
            warn!("Playback service already running");
            return Ok(());
        }

        info!("Starting playback service");
        self.ctx.set_running(true);

        if let Err(e) = self.storage.ensure_dirs() {
            error!("Failed to initialize storage: {}", e);
            self.ctx.set_running(false);
            return Err(e);
        }

        self.ctx.load_videos().await;

        let shutdown = CancellationToken::new();
        let sync = tokio::spawn(sync_loop::run(Arc::clone(&self.ctx), shutdown.clone()));
        info!("Video synchronization task started");
        let playback = tokio::spawn(playback_loop::run(Arc::clone(&self.ctx), shutdown.clone()));
        info!("Video playback task started");

        *self.tasks.lock() = Some(LoopTasks {
            shutdown,
            sync,
            playback,
        });

        Ok(())
    }

    /// Stop the service
    ///
    /// Clears the running flag, stops the player right away, then waits for
    /// both loops, each for at most the configured join timeout. A loop that
    /// does not finish in time is aborted and left behind.
    pub async fn stop(&self) {
        info!("Stopping playback service");
        self.ctx.set_running(false);

        let tasks = self.tasks.lock().take();
        if let Some(tasks) = &tasks {
            tasks.shutdown.cancel();
        }

        self.ctx.player.stop();

        if let Some(tasks) = tasks {
            let timeout = self.ctx.config.join_timeout;
            tokio::join!(
                join_loop("sync", tasks.sync, timeout),
                join_loop("playback", tasks.playback, timeout),
            );
        }

        info!("Playback service stopped");
    }

    /// Snapshot of the service state
    pub fn status(&self) -> ServiceStatus {
        let (sync_alive, playback_alive) = match self.tasks.lock().as_ref() {
            Some(tasks) => (!tasks.sync.is_finished(), !tasks.playback.is_finished()),
            None => (false, false),
        };

        ServiceStatus {
            running: self.ctx.is_running(),
            playlist_size: self.ctx.playlist.len(),
            current_video: self.ctx.current_video(),
            sync_alive,
            playback_alive,
        }
    }

    /// Handle to the playlist currently in use
    pub fn playlist(&self) -> SharedPlaylist {
        self.ctx.playlist.clone()
    }

    /// Storage layout the service prepares on start
    pub fn storage(&self) -> &StorageLayout {
        &self.storage
    }
}

impl Drop for PlaybackService {
    fn drop(&mut self) {
        if let Some(tasks) = self.tasks.get_mut().take() {
            self.ctx.set_running(false);
            tasks.shutdown.cancel();
        }
    }
}

/// Wait for a loop task, giving up after `timeout`
async fn join_loop(name: &str, mut handle: JoinHandle<()>, timeout: Duration) -> bool {
    match tokio::time::timeout(timeout, &mut handle).await {
        Ok(Ok(())) => {
            debug!("{} loop joined", name);
            true
        }
        Ok(Err(e)) => {
            error!("{} loop ended abnormally: {}", name, e);
            true
        }
        Err(_) => {
            warn!(
                "{} loop did not stop within {:?}, abandoning it",
                name, timeout
            );
            handle.abort();
            false
        }
    }
}
