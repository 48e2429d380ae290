//! Signage Player Core
//!
//! Platform-agnostic types, collaborator traits, and error handling shared by
//! every Signage Player crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Video`, `Playlist`, `PlayerStatus`
//! - **Collaborator Traits**: `VideoRepository` (where videos come from) and
//!   `VideoPlayer` (what renders them)
//! - **Storage Layout**: `StorageLayout`, the folders a signage install uses
//! - **Error Handling**: Unified `SignageError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use signage_core::{Playlist, Video};
//! use std::path::PathBuf;
//!
//! let mut playlist = Playlist::new(vec![
//!     Video::new("a", "intro.mp4", PathBuf::from("/videos/intro.mp4")),
//!     Video::new("b", "promo.mp4", PathBuf::from("/videos/promo.mp4")),
//! ]);
//!
//! assert_eq!(playlist.next().map(|v| v.id), Some("a".to_string()));
//! assert_eq!(playlist.next().map(|v| v.id), Some("b".to_string()));
//! assert_eq!(playlist.next().map(|v| v.id), Some("a".to_string()));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod storage;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Result, SignageError};
pub use storage::StorageLayout;
pub use traits::{VideoPlayer, VideoRepository};
pub use types::{PlayerStatus, Playlist, Video};
