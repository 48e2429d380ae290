//! Repository backed by a plain directory of video files

use crate::scanner::VideoScanner;
use async_trait::async_trait;
use signage_core::{Result, Video, VideoRepository};
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// Serves whatever video files sit in one directory
///
/// The directory is rescanned on every listing, so files dropped in or
/// removed by hand show up at the next sync pass. There is nothing to pull
/// from anywhere, so `sync_videos` does no work.
#[derive(Debug, Clone)]
pub struct LocalDirectoryRepository {
    dir: PathBuf,
    scanner: VideoScanner,
}

impl LocalDirectoryRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            scanner: VideoScanner::new(),
        }
    }

    /// Use a custom scanner (depth, symlinks)
    pub fn with_scanner(mut self, scanner: VideoScanner) -> Self {
        self.scanner = scanner;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl VideoRepository for LocalDirectoryRepository {
    async fn get_videos(&self) -> Vec<Video> {
        let dir = self.dir.clone();
        let scanner = self.scanner;

        match tokio::task::spawn_blocking(move || scanner.scan_videos(&dir)).await {
            Ok(Ok(videos)) => {
                debug!("Found {} videos in {}", videos.len(), self.dir.display());
                videos
            }
            Ok(Err(e)) => {
                warn!("Failed to scan {}: {}", self.dir.display(), e);
                Vec::new()
            }
            Err(e) => {
                error!("Directory scan task failed: {}", e);
                Vec::new()
            }
        }
    }

    async fn sync_videos(&self) -> Result<()> {
        debug!("Local source {} has nothing to sync", self.dir.display());
        Ok(())
    }
}
