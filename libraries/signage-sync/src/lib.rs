//! Signage Player - Video Sources
//!
//! `VideoRepository` implementations:
//! - `LocalDirectoryRepository`: serves the video files of one folder
//! - `RemoteManifestRepository`: mirrors an HTTP JSON manifest into the
//!   local video folder, keeping one metadata record per download
//!
//! The building blocks (scanner, metadata store, sync planner) are public so
//! the CLI can reuse them.

mod checksum;
mod error;
mod local;
mod manifest;
mod metadata;
mod plan;
mod remote;
mod scanner;

// Public exports
pub use checksum::{file_checksum, name_checksum};
pub use error::{Result, SyncError};
pub use local::LocalDirectoryRepository;
pub use manifest::{sanitize_name, validate_entries, ManifestEntry};
pub use metadata::{MetadataStore, VideoMetadata};
pub use plan::{plan_sync, SyncPlan};
pub use remote::{RemoteManifestRepository, SyncReport};
pub use scanner::{is_video_file, local_video, VideoScanner};
