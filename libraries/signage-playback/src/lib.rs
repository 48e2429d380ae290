//! Signage Player - Playback Orchestration
//!
//! Keeps a display playing videos forever while the video set changes
//! underneath it.
//!
//! This crate provides:
//! - `PlaybackService`: start/stop/status for the whole engine
//! - A sync loop that refreshes the playlist from a `VideoRepository`
//! - A playback loop that drives a `VideoPlayer` through each video
//! - `SharedPlaylist`: the playlist cell both loops share
//!
//! # Architecture
//!
//! `signage-playback` knows nothing about where videos come from or how they
//! are rendered. Both are supplied as trait objects from `signage-core`, so
//! the same engine runs with a local folder, a remote manifest, a real player
//! process or test doubles.
//!
//! # Example
//!
//! ```rust,no_run
//! use signage_core::{PlayerStatus, StorageLayout, Video, VideoPlayer, VideoRepository};
//! use signage_playback::{PlaybackConfig, PlaybackService};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! struct Folder;
//!
//! #[async_trait::async_trait]
//! impl VideoRepository for Folder {
//!     async fn get_videos(&self) -> Vec<Video> {
//!         Vec::new()
//!     }
//!
//!     async fn sync_videos(&self) -> signage_core::Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! struct Screen;
//!
//! impl VideoPlayer for Screen {
//!     fn play(&self, _path: &Path) -> bool {
//!         true
//!     }
//!
//!     fn stop(&self) {}
//!
//!     fn status(&self) -> PlayerStatus {
//!         PlayerStatus::Ended
//!     }
//! }
//!
//! # async fn run() -> signage_core::Result<()> {
//! let service = PlaybackService::new(
//!     Arc::new(Folder),
//!     Arc::new(Screen),
//!     StorageLayout::default(),
//!     PlaybackConfig::default(),
//! );
//!
//! service.start().await?;
//! println!("{:?}", service.status());
//! service.stop().await;
//! # Ok(())
//! # }
//! ```

mod config;
mod context;
mod playback_loop;
mod service;
mod shared;
mod sync_loop;
pub mod types;

// Public exports
pub use config::PlaybackConfig;
pub use service::PlaybackService;
pub use shared::SharedPlaylist;
pub use types::{PlaybackOutcome, ServiceStatus};
