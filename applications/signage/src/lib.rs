//! Signage Player Application
//!
//! Unattended video signage: plays a folder or a remote manifest of videos
//! on a loop through an external player.
//!
//! This library exposes the wiring for the binary and its tests.

pub mod app;
pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types for convenience
pub use config::{SignageConfig, SourceKind};
pub use error::{AppError, Result};
