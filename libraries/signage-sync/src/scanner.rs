//! File scanning for video files

use crate::checksum::name_checksum;
use crate::{Result, SyncError};
use chrono::{DateTime, Utc};
use signage_core::Video;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Supported video file extensions
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "webm"];

/// Scanner for video files in a directory
#[derive(Debug, Clone, Copy)]
pub struct VideoScanner {
    /// Whether to follow symbolic links
    follow_links: bool,

    /// Maximum depth to traverse (1 = the directory itself)
    max_depth: usize,
}

impl Default for VideoScanner {
    fn default() -> Self {
        Self {
            follow_links: false,
            max_depth: 1,
        }
    }
}

impl VideoScanner {
    /// Create a scanner that only looks at the top level
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to follow symbolic links
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Set maximum directory depth to traverse
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Video file paths in `dir`, sorted by file name
    pub fn scan_directory(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(SyncError::DirectoryNotFound(dir.display().to_string()));
        }

        let walker = WalkDir::new(dir)
            .follow_links(self.follow_links)
            .max_depth(self.max_depth)
            .sort_by_file_name();

        let files = walker
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_file() || entry.path().is_file())
            .map(walkdir::DirEntry::into_path)
            .filter(|path| is_video_file(path))
            .collect();

        Ok(files)
    }

    /// Describe every video file in `dir`
    ///
    /// Files whose metadata cannot be read are skipped with a warning. Ids
    /// are unique: when two files share a stem (`a.mp4`, `a.mkv`) the later
    /// one is keyed by its full file name instead.
    pub fn scan_videos(&self, dir: &Path) -> Result<Vec<Video>> {
        let mut seen = HashSet::new();
        let mut videos = Vec::new();

        for path in self.scan_directory(dir)? {
            let mut video = match local_video(&path) {
                Ok(video) => video,
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            };

            if !seen.insert(video.id.clone()) {
                video.id = format!("local_{}", video.name);
                if !seen.insert(video.id.clone()) {
                    tracing::warn!("Skipping {}: duplicate video id {}", path.display(), video.id);
                    continue;
                }
            }

            videos.push(video);
        }

        Ok(videos)
    }
}

/// Check if a file has a supported video extension
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| VIDEO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Build a `Video` for a file found on local disk
pub fn local_video(path: &Path) -> Result<Video> {
    let metadata = std::fs::metadata(path)?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| SyncError::InvalidEntry(path.display().to_string()))?;
    let stem = path
        .file_stem()
        .map_or_else(|| name.clone(), |s| s.to_string_lossy().into_owned());

    let modified_time = metadata
        .modified()
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| Utc::now());

    tracing::debug!("Found video file: {}", name);

    Ok(Video {
        id: format!("local_{stem}"),
        checksum: name_checksum(&name),
        name,
        path: path.to_path_buf(),
        size: metadata.len(),
        modified_time,
        remote_id: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_is_video_file() {
        assert!(is_video_file(Path::new("clip.mp4")));
        assert!(is_video_file(Path::new("clip.MKV")));
        assert!(is_video_file(Path::new("clip.webm")));
        assert!(is_video_file(Path::new("clip.Mov")));
        assert!(is_video_file(Path::new("clip.avi")));
        assert!(!is_video_file(Path::new("clip.mp3")));
        assert!(!is_video_file(Path::new("clip")));
        assert!(!is_video_file(Path::new(".mp4")));
    }

    #[test]
    fn test_scan_is_flat_and_sorted() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();

        fs::write(base.join("b.mp4"), b"b").unwrap();
        fs::write(base.join("a.MOV"), b"a").unwrap();
        fs::write(base.join("notes.txt"), b"not a video").unwrap();

        let subdir = base.join("nested.mp4");
        fs::create_dir(&subdir).unwrap();
        fs::write(subdir.join("c.mp4"), b"c").unwrap();

        let files = VideoScanner::new().scan_directory(base).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, ["a.MOV", "b.mp4"]);
    }

    #[test]
    fn test_scan_deeper_when_asked() {
        let temp = TempDir::new().unwrap();
        let subdir = temp.path().join("sub");
        fs::create_dir(&subdir).unwrap();
        fs::write(subdir.join("c.mp4"), b"c").unwrap();

        let files = VideoScanner::new().max_depth(2).scan_directory(temp.path()).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_shared_stems_get_distinct_ids() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.mp4"), b"mp4").unwrap();
        fs::write(temp.path().join("a.mkv"), b"mkv").unwrap();
        fs::write(temp.path().join("b.webm"), b"webm").unwrap();

        let videos = VideoScanner::new().scan_videos(temp.path()).unwrap();
        let ids: Vec<_> = videos.iter().map(|v| v.id.as_str()).collect();

        assert_eq!(ids, ["local_a", "local_a.mp4", "local_b"]);
    }

    #[test]
    fn test_scan_missing_directory() {
        let temp = TempDir::new().unwrap();
        let err = VideoScanner::new()
            .scan_directory(&temp.path().join("missing"))
            .unwrap_err();
        assert!(matches!(err, SyncError::DirectoryNotFound(_)));
    }

    #[test]
    fn test_local_video_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("promo.mp4");
        fs::write(&path, b"12345").unwrap();

        let video = local_video(&path).unwrap();
        assert_eq!(video.id, "local_promo");
        assert_eq!(video.name, "promo.mp4");
        assert_eq!(video.size, 5);
        assert_eq!(video.checksum, name_checksum("promo.mp4"));
        assert_eq!(video.remote_id, None);
        assert!(video.is_valid());
    }
}
