//! Player that runs one external process per video

use crate::error::{PlayerError, Result};
use parking_lot::Mutex;
use signage_core::{PlayerStatus, VideoPlayer};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use tracing::{debug, error, info, warn};

/// Arguments for VLC's command line front end
///
/// Fullscreen, no title overlay, hidden cursor, quiet, and exit once the
/// video ends so the process exit status tells us how playback went.
pub const VLC_ARGS: &[&str] = &[
    "--fullscreen",
    "--no-video-title-show",
    "--mouse-hide-timeout=0",
    "--quiet",
    "--play-and-exit",
];

/// Drives playback by spawning `<program> <args...> <video path>`
///
/// Status comes from the process itself:
///
/// | process               | status            |
/// |-----------------------|-------------------|
/// | none started yet      | `Idle`            |
/// | running               | `Playing`         |
/// | exited with 0         | `Ended`           |
/// | exited otherwise      | `Error`           |
/// | cannot be queried     | `Idle`            |
/// | killed by `stop()`    | `Stopped`         |
pub struct ProcessPlayer {
    program: PathBuf,
    args: Vec<OsString>,
    state: Mutex<State>,
}

struct State {
    child: Option<Child>,
    /// Status once no process is running
    settled: PlayerStatus,
}

impl ProcessPlayer {
    /// Create a player for `program`
    ///
    /// # Errors
    /// Returns `PlayerError::ProgramNotFound` if `program` is neither an
    /// existing file nor found on `PATH`.
    pub fn new<I, S>(program: impl AsRef<Path>, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let program = resolve_program(program.as_ref())?;
        info!("Using player program {}", program.display());

        Ok(Self {
            program,
            args: args.into_iter().map(Into::into).collect(),
            state: Mutex::new(State {
                child: None,
                settled: PlayerStatus::Idle,
            }),
        })
    }

    /// VLC with the signage defaults
    pub fn vlc(program: impl AsRef<Path>) -> Result<Self> {
        Self::new(program, VLC_ARGS.iter().copied())
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn spawn(&self, path: &Path) -> std::io::Result<Child> {
        Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
    }
}

impl VideoPlayer for ProcessPlayer {
    fn play(&self, path: &Path) -> bool {
        if !path.is_file() {
            error!("Video file not found: {}", path.display());
            return false;
        }

        let mut state = self.state.lock();
        if let Some(previous) = state.child.take() {
            terminate(previous);
        }

        match self.spawn(path) {
            Ok(child) => {
                debug!(pid = child.id(), "Player process started");
                state.child = Some(child);
                info!("Started playing: {}", path.display());
                true
            }
            Err(e) => {
                error!("Failed to play video {}: {}", path.display(), e);
                state.settled = PlayerStatus::Error;
                false
            }
        }
    }

    fn stop(&self) {
        let mut state = self.state.lock();
        if let Some(child) = state.child.take() {
            terminate(child);
            info!("Video playback stopped");
        }
        state.settled = PlayerStatus::Stopped;
    }

    fn status(&self) -> PlayerStatus {
        let mut state = self.state.lock();
        let Some(child) = state.child.as_mut() else {
            return state.settled;
        };

        let settled = match child.try_wait() {
            Ok(None) => return PlayerStatus::Playing,
            Ok(Some(exit)) if exit.success() => PlayerStatus::Ended,
            Ok(Some(exit)) => {
                warn!("Player exited with {}", exit);
                PlayerStatus::Error
            }
            Err(e) => {
                error!("Error checking playback state: {}", e);
                return PlayerStatus::Idle;
            }
        };

        state.child = None;
        state.settled = settled;
        settled
    }
}

impl Drop for ProcessPlayer {
    fn drop(&mut self) {
        if let Some(child) = self.state.get_mut().child.take() {
            terminate(child);
        }
    }
}

/// Kill and reap a player process
fn terminate(mut child: Child) {
    // Already exited is fine; wait() below reaps it either way
    let _ = child.kill();
    if let Err(e) = child.wait() {
        warn!("Failed to reap player process: {}", e);
    }
}

/// Find the executable for `program`
///
/// Paths with more than one component must exist as given. Bare names are
/// looked up on `PATH`.
pub fn resolve_program(program: &Path) -> Result<PathBuf> {
    let not_found = || PlayerError::ProgramNotFound(program.display().to_string());

    if program.as_os_str().is_empty() {
        return Err(not_found());
    }

    if program.components().count() > 1 || program.is_absolute() {
        return if program.is_file() {
            Ok(program.to_path_buf())
        } else {
            Err(not_found())
        };
    }

    let path = std::env::var_os("PATH").ok_or_else(not_found)?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
        .ok_or_else(not_found)
}
