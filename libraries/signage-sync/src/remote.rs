//! Repository mirroring a remote HTTP manifest into the local video folder

use crate::checksum::file_checksum;
use crate::manifest::{validate_entries, ManifestEntry};
use crate::metadata::{MetadataStore, VideoMetadata};
use crate::plan::{plan_sync, SyncPlan};
use crate::{Result, SyncError};
use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use signage_core::{StorageLayout, Video, VideoRepository};
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info, warn};

/// Outcome of one sync pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Files downloaded and recorded
    pub downloaded: usize,
    /// Files and records removed because they left the manifest
    pub deleted: usize,
    /// Downloads or deletions that went wrong and will be retried
    pub failed: usize,
}

/// Keeps `videos_dir` in line with a remote manifest
///
/// ```text
/// fetch manifest ──> plan against metadata records ──┬──> download new/changed
///                                                    └──> delete vanished
/// ```
///
/// Only a failed manifest fetch fails the pass. A single download or delete
/// that goes wrong is logged, counted, and retried on the next pass.
pub struct RemoteManifestRepository {
    http: Client,
    manifest_url: String,
    storage: StorageLayout,
    store: MetadataStore,
}

impl RemoteManifestRepository {
    /// Create a repository for `manifest_url`
    ///
    /// `request_timeout` bounds every HTTP request, downloads included.
    pub fn new(
        manifest_url: impl Into<String>,
        storage: StorageLayout,
        request_timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder().timeout(request_timeout).build()?;

        Ok(Self {
            http,
            manifest_url: manifest_url.into(),
            store: MetadataStore::new(storage.metadata_dir()),
            storage,
        })
    }

    /// URL of the manifest this repository mirrors
    pub fn manifest_url(&self) -> &str {
        &self.manifest_url
    }

    /// Records of the videos downloaded so far
    pub fn metadata_store(&self) -> &MetadataStore {
        &self.store
    }

    /// Fetch and validate the remote listing
    pub async fn fetch_manifest(&self) -> Result<Vec<ManifestEntry>> {
        debug!(url = %self.manifest_url, "Fetching manifest");

        let response = self.http.get(&self.manifest_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::ServerError {
                status: status.as_u16(),
                url: self.manifest_url.clone(),
            });
        }

        let entries: Vec<ManifestEntry> = response.json().await?;
        Ok(validate_entries(entries))
    }

    /// Run one full sync pass
    pub async fn sync(&self) -> Result<SyncReport> {
        self.storage
            .ensure_dirs()
            .map_err(|e| SyncError::Storage(e.to_string()))?;

        let remote = self.fetch_manifest().await?;
        let local = self.load_records().await?;
        let plan = plan_sync(&remote, &local, VideoMetadata::file_exists);

        if plan.is_empty() {
            debug!("Local videos are up to date ({} remote)", remote.len());
            return Ok(SyncReport::default());
        }

        info!(
            "Sync plan: {} to download, {} to delete",
            plan.downloads.len(),
            plan.deletions.len()
        );

        Ok(self.apply(plan, &local, &remote).await)
    }

    async fn apply(
        &self,
        plan: SyncPlan,
        local: &[VideoMetadata],
        remote: &[ManifestEntry],
    ) -> SyncReport {
        let mut report = SyncReport::default();

        // Deletions first: a new entry may reuse the file name of a vanished one
        for record in &plan.deletions {
            match self.delete(record).await {
                Ok(()) => {
                    info!("Deleted local video: {}", record.local_path.display());
                    report.deleted += 1;
                }
                Err(e) => {
                    error!("Failed to delete local video {}: {}", record.local_path.display(), e);
                    report.failed += 1;
                }
            }
        }

        let in_use: HashSet<PathBuf> = remote
            .iter()
            .map(|entry| self.storage.videos_dir.join(&entry.name))
            .collect();

        for entry in &plan.downloads {
            let previous = local.iter().find(|r| r.remote_id == entry.id);
            match self.download(entry).await {
                Ok(record) => {
                    info!("Downloaded {} ({} bytes)", record.name, record.size);
                    report.downloaded += 1;

                    // Renamed remotely: drop the file stored under the old name
                    if let Some(old) = previous {
                        if !in_use.contains(&old.local_path) {
                            remove_if_exists(&old.local_path).await;
                        }
                    }
                }
                Err(e) => {
                    error!("Failed to download {}: {}", entry.name, e);
                    report.failed += 1;
                }
            }
        }

        report
    }

    /// Download one entry and record it
    async fn download(&self, entry: &ManifestEntry) -> Result<VideoMetadata> {
        let part = self.storage.temp_dir().join(format!("{}.part", part_stem(&entry.id)));
        let target = self.storage.videos_dir.join(&entry.name);

        let written = match self.fetch_to(&entry.url, &part).await {
            Ok(written) => written,
            Err(e) => {
                remove_if_exists(&part).await;
                return Err(e);
            }
        };

        let checksum = {
            let part = part.clone();
            tokio::task::spawn_blocking(move || file_checksum(&part)).await??
        };

        if let Some(expected) = &entry.checksum {
            if !expected.eq_ignore_ascii_case(&checksum) {
                remove_if_exists(&part).await;
                return Err(SyncError::ChecksumMismatch {
                    name: entry.name.clone(),
                    expected: expected.clone(),
                    actual: checksum,
                });
            }
        }

        move_into_place(&part, &target).await?;

        let record = VideoMetadata {
            id: entry.id.clone(),
            name: entry.name.clone(),
            size: entry.size,
            modified_time: entry.modified_time,
            local_path: target,
            checksum,
            remote_id: entry.id.clone(),
        };

        let store = self.store.clone();
        let saved = record.clone();
        tokio::task::spawn_blocking(move || store.save(&saved)).await??;

        debug!(id = %entry.id, bytes = written, "Stored video");
        Ok(record)
    }

    /// Stream `url` into `dest`, returning the number of bytes written
    async fn fetch_to(&self, url: &str, dest: &Path) -> Result<u64> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::ServerError {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let mut file = File::create(dest).await?;
        let mut written: u64 = 0;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }

        file.flush().await?;
        Ok(written)
    }

    async fn delete(&self, record: &VideoMetadata) -> Result<()> {
        match tokio::fs::remove_file(&record.local_path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        let store = self.store.clone();
        let id = record.id.clone();
        tokio::task::spawn_blocking(move || store.remove(&id)).await??;
        Ok(())
    }

    async fn load_records(&self) -> Result<Vec<VideoMetadata>> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.load_all()).await?
    }
}

#[async_trait]
impl VideoRepository for RemoteManifestRepository {
    async fn get_videos(&self) -> Vec<Video> {
        match self.load_records().await {
            Ok(records) => records
                .iter()
                .filter(|r| r.file_exists())
                .map(VideoMetadata::to_video)
                .collect(),
            Err(e) => {
                error!("Failed to get videos from metadata: {}", e);
                Vec::new()
            }
        }
    }

    async fn sync_videos(&self) -> signage_core::Result<()> {
        let report = self.sync().await?;
        if report.failed > 0 {
            warn!(
                "Sync finished with {} failures ({} downloaded, {} deleted)",
                report.failed, report.downloaded, report.deleted
            );
        } else if report != SyncReport::default() {
            info!(
                "Sync finished: {} downloaded, {} deleted",
                report.downloaded, report.deleted
            );
        }
        Ok(())
    }
}

fn part_stem(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}

/// Rename into place, copying when the two paths are on different devices
async fn move_into_place(from: &Path, to: &Path) -> Result<()> {
    if tokio::fs::rename(from, to).await.is_ok() {
        return Ok(());
    }

    tokio::fs::copy(from, to).await?;
    remove_if_exists(from).await;
    Ok(())
}

async fn remove_if_exists(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != ErrorKind::NotFound {
            warn!("Failed to remove {}: {}", path.display(), e);
        }
    }
}
