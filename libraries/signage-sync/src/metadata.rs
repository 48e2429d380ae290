//! Per-video metadata records for synced videos
//!
//! One JSON file per video under `<cache_dir>/metadata/`. The records are the
//! only memory the remote repository has of what it downloaded.

use crate::checksum::id_digest;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use signage_core::Video;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

/// What is known locally about a downloaded video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMetadata {
    /// Video id, the same as the manifest entry id
    pub id: String,
    /// Sanitized file name inside the videos folder
    pub name: String,
    /// Size as advertised by the remote source
    pub size: u64,
    /// Remote modification time at download
    pub modified_time: DateTime<Utc>,
    /// Where the downloaded file lives
    pub local_path: PathBuf,
    /// Hex SHA-256 of the downloaded file
    pub checksum: String,
    /// Id of the manifest entry this file was downloaded from
    pub remote_id: String,
}

impl VideoMetadata {
    /// Video handed to the playlist for this record
    pub fn to_video(&self) -> Video {
        Video {
            id: self.id.clone(),
            name: self.name.clone(),
            path: self.local_path.clone(),
            size: self.size,
            modified_time: self.modified_time,
            checksum: self.checksum.clone(),
            remote_id: Some(self.remote_id.clone()),
        }
    }

    /// Whether the downloaded file is still on disk
    pub fn file_exists(&self) -> bool {
        self.local_path.is_file()
    }
}

/// Directory of metadata records
#[derive(Debug, Clone)]
pub struct MetadataStore {
    dir: PathBuf,
}

impl MetadataStore {
    /// Store keeping its records in `dir`, created on first save
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Record file for a video id
    pub fn record_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", record_stem(id)))
    }

    /// Load every readable record, sorted by name
    ///
    /// A missing directory means no records. Unreadable or corrupt files are
    /// skipped with a warning.
    pub fn load_all(&self) -> Result<Vec<VideoMetadata>> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            match read_record(&path) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Failed to load metadata {}: {}", path.display(), e),
            }
        }

        records.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(records)
    }

    /// Write a record, replacing any previous one for the same id
    pub fn save(&self, record: &VideoMetadata) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.record_path(&record.id);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(record)?)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Remove the record for `id`; removing a missing record is not an error
    pub fn remove(&self, id: &str) -> Result<()> {
        match std::fs::remove_file(self.record_path(id)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn read_record(path: &Path) -> Result<VideoMetadata> {
    let bytes = std::fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// File-system safe stem for a remote id
///
/// The readable part replaces unsafe characters, so a short digest of the raw
/// id keeps `a.b` and `a_b` apart.
fn record_stem(id: &str) -> String {
    let readable: String = id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!("{}-{}", readable, &id_digest(id)[..8])
}
