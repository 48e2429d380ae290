//! Signage Player - Video Output
//!
//! `ProcessPlayer` implements `signage_core::VideoPlayer` by running an
//! external media player (VLC by default) once per video and watching the
//! process.

mod error;
mod process;

// Public exports
pub use error::{PlayerError, Result};
pub use process::{resolve_program, ProcessPlayer, VLC_ARGS};
