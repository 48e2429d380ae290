/// Video domain type
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A video file known to a repository
///
/// Built by the repository every time it lists videos and treated as an
/// immutable value afterwards. The backing file may disappear at any moment
/// (a concurrent sync can delete it), so validity is never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// Identifier, unique within a playlist
    pub id: String,

    /// Display name (usually the file name)
    pub name: String,

    /// Location of the backing file
    pub path: PathBuf,

    /// File size in bytes
    pub size: u64,

    /// Last modification time of the file
    pub modified_time: DateTime<Utc>,

    /// Content checksum
    pub checksum: String,

    /// Identifier on the remote source, if the video was synced from one
    pub remote_id: Option<String>,
}

impl Video {
    /// Create a video with minimal metadata
    pub fn new(id: impl Into<String>, name: impl Into<String>, path: PathBuf) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            path,
            size: 0,
            modified_time: Utc::now(),
            checksum: String::new(),
            remote_id: None,
        }
    }

    /// Whether the backing file currently exists as a regular file
    ///
    /// Hits the filesystem on every call.
    pub fn is_valid(&self) -> bool {
        self.path.is_file()
    }
}
