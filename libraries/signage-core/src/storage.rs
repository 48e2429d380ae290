/// On-disk layout shared by the playback engine and repositories
use crate::error::{Result, SignageError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directories used by a signage installation
///
/// ```text
/// videos/            played files
/// cache/metadata/    one JSON record per synced video
/// cache/temp/        partial downloads
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageLayout {
    /// Folder holding the playable videos
    pub videos_dir: PathBuf,

    /// Folder for metadata and temporary files
    pub cache_dir: PathBuf,
}

impl StorageLayout {
    /// Create a layout from the two root folders
    pub fn new(videos_dir: impl Into<PathBuf>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            videos_dir: videos_dir.into(),
            cache_dir: cache_dir.into(),
        }
    }

    /// Folder holding per-video metadata records
    pub fn metadata_dir(&self) -> PathBuf {
        self.cache_dir.join("metadata")
    }

    /// Folder holding in-flight downloads
    pub fn temp_dir(&self) -> PathBuf {
        self.cache_dir.join("temp")
    }

    /// Create every directory of the layout
    ///
    /// # Errors
    /// Returns `SignageError::Storage` naming the directory that could not be
    /// created
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [
            self.videos_dir.clone(),
            self.cache_dir.clone(),
            self.metadata_dir(),
            self.temp_dir(),
        ] {
            create_dir(&dir)?;
        }
        Ok(())
    }
}

impl Default for StorageLayout {
    fn default() -> Self {
        Self::new("videos", "cache")
    }
}

fn create_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| {
        SignageError::storage(format!("cannot create {}: {}", dir.display(), e))
    })
}
