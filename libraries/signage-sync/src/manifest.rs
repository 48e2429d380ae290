//! Remote manifest format
//!
//! The manifest is a JSON array served over HTTP:
//!
//! ```json
//! [
//!   {
//!     "id": "a1",
//!     "name": "welcome.mp4",
//!     "size": 1048576,
//!     "modified_time": "2024-03-01T09:00:00Z",
//!     "checksum": "9f86d08...",
//!     "url": "https://cdn.example.com/videos/welcome.mp4"
//!   }
//! ]
//! ```
//!
//! `checksum` is optional. When present it is the hex SHA-256 of the file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

/// One video advertised by the remote source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Remote identifier
    pub id: String,

    /// File name to store the video under
    pub name: String,

    /// Size in bytes as advertised
    #[serde(default)]
    pub size: u64,

    /// Last modification time on the remote side
    pub modified_time: DateTime<Utc>,

    /// Hex SHA-256 of the content, if the source publishes one
    #[serde(default)]
    pub checksum: Option<String>,

    /// Where to download the content from
    pub url: String,
}

/// Reduce a remote file name to a bare, safe local file name
///
/// Keeps only the last path component (either separator style) and rejects
/// names that would resolve outside the target directory.
pub fn sanitize_name(name: &str) -> Option<String> {
    let last = name.rsplit(['/', '\\']).next()?.trim();

    if last.is_empty() || last == "." || last == ".." || last.chars().any(char::is_control) {
        return None;
    }

    Some(last.to_string())
}

/// Drop entries that cannot be stored safely
///
/// Names are sanitized in place. Entries with an unusable name, an empty id
/// or url, or an id or name already taken by an earlier entry are skipped
/// with a warning.
pub fn validate_entries(entries: Vec<ManifestEntry>) -> Vec<ManifestEntry> {
    let mut ids = HashSet::new();
    let mut names = HashSet::new();

    entries
        .into_iter()
        .filter_map(|mut entry| {
            if entry.id.trim().is_empty() || entry.url.trim().is_empty() {
                warn!("Skipping manifest entry without id or url: {:?}", entry.name);
                return None;
            }

            let Some(name) = sanitize_name(&entry.name) else {
                warn!("Skipping manifest entry {} with unusable name {:?}", entry.id, entry.name);
                return None;
            };

            if !ids.insert(entry.id.clone()) {
                warn!("Skipping duplicate manifest id {}", entry.id);
                return None;
            }

            if !names.insert(name.to_lowercase()) {
                warn!("Skipping manifest entry {}: name {} already used", entry.id, name);
                return None;
            }

            entry.name = name;
            Some(entry)
        })
        .collect()
}
