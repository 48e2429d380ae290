//! Decide what a sync pass has to do

use crate::manifest::ManifestEntry;
use crate::metadata::VideoMetadata;
use std::collections::{HashMap, HashSet};

/// Work for one sync pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    /// Remote entries to (re)download
    pub downloads: Vec<ManifestEntry>,
    /// Local records no longer advertised remotely
    pub deletions: Vec<VideoMetadata>,
}

impl SyncPlan {
    pub fn is_empty(&self) -> bool {
        self.downloads.is_empty() && self.deletions.is_empty()
    }
}

/// Compare the remote listing with local records
///
/// An entry is downloaded when there is no local record for it, its file is
/// gone (`file_exists` says so), or its name, size, modification time or
/// advertised checksum changed. Records whose remote id is not in the
/// listing are deleted.
pub fn plan_sync(
    remote: &[ManifestEntry],
    local: &[VideoMetadata],
    file_exists: impl Fn(&VideoMetadata) -> bool,
) -> SyncPlan {
    let by_remote_id: HashMap<&str, &VideoMetadata> =
        local.iter().map(|r| (r.remote_id.as_str(), r)).collect();

    let downloads = remote
        .iter()
        .filter(|entry| match by_remote_id.get(entry.id.as_str()) {
            None => true,
            Some(record) => !file_exists(record) || needs_update(entry, record),
        })
        .cloned()
        .collect();

    let remote_ids: HashSet<&str> = remote.iter().map(|e| e.id.as_str()).collect();
    let deletions = local
        .iter()
        .filter(|record| !remote_ids.contains(record.remote_id.as_str()))
        .cloned()
        .collect();

    SyncPlan {
        downloads,
        deletions,
    }
}

fn needs_update(remote: &ManifestEntry, local: &VideoMetadata) -> bool {
    remote.name != local.name
        || remote.size != local.size
        || remote.modified_time != local.modified_time
        || remote
            .checksum
            .as_ref()
            .is_some_and(|c| !c.eq_ignore_ascii_case(&local.checksum))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};
    use std::path::PathBuf;

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-01T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn remote(id: &str) -> ManifestEntry {
        ManifestEntry {
            id: id.to_string(),
            name: format!("{id}.mp4"),
            size: 100,
            modified_time: t0(),
            checksum: None,
            url: format!("http://cdn/{id}"),
        }
    }

    fn local(id: &str) -> VideoMetadata {
        VideoMetadata {
            id: id.to_string(),
            name: format!("{id}.mp4"),
            size: 100,
            modified_time: t0(),
            local_path: PathBuf::from(format!("/videos/{id}.mp4")),
            checksum: "aa11".to_string(),
            remote_id: id.to_string(),
        }
    }

    fn ids(entries: &[ManifestEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn up_to_date_plan_is_empty() {
        let plan = plan_sync(&[remote("a"), remote("b")], &[local("a"), local("b")], |_| true);
        assert!(plan.is_empty());
    }

    #[test]
    fn new_entries_are_downloaded() {
        let plan = plan_sync(&[remote("a"), remote("b")], &[local("a")], |_| true);
        assert_eq!(ids(&plan.downloads), ["b"]);
        assert!(plan.deletions.is_empty());
    }

    #[test]
    fn vanished_entries_are_deleted() {
        let plan = plan_sync(&[remote("a")], &[local("a"), local("gone")], |_| true);
        assert!(plan.downloads.is_empty());
        assert_eq!(plan.deletions.len(), 1);
        assert_eq!(plan.deletions[0].id, "gone");
    }

    #[test]
    fn empty_remote_deletes_everything() {
        let plan = plan_sync(&[], &[local("a"), local("b")], |_| true);
        assert_eq!(plan.deletions.len(), 2);
    }

    #[test]
    fn changed_entries_are_downloaded_again() {
        let mut bigger = remote("size");
        bigger.size = 200;

        let mut newer = remote("time");
        newer.modified_time = t0() + Duration::hours(1);

        let mut renamed = remote("name");
        renamed.name = "renamed.mp4".to_string();

        let mut other_content = remote("sum");
        other_content.checksum = Some("bb22".to_string());

        let mut same_content = remote("same");
        same_content.checksum = Some("AA11".to_string());

        let plan = plan_sync(
            &[bigger, newer, renamed, other_content, same_content],
            &[local("size"), local("time"), local("name"), local("sum"), local("same")],
            |_| true,
        );

        assert_eq!(ids(&plan.downloads), ["size", "time", "name", "sum"]);
    }

    #[test]
    fn missing_files_are_downloaded_again() {
        let plan = plan_sync(&[remote("a"), remote("b")], &[local("a"), local("b")], |r| {
            r.id != "b"
        });
        assert_eq!(ids(&plan.downloads), ["b"]);
    }
}
