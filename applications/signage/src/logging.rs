//! Console and dated log-file output

use crate::error::{AppError, Result};
use chrono::{Datelike, Local, NaiveDate};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str =
    "signage=info,signage_playback=info,signage_sync=info,signage_player=info";

/// Log file for `date`: `<logs_dir>/YYYY/MM/DD.log`
pub fn log_file_path(logs_dir: &Path, date: NaiveDate) -> PathBuf {
    logs_dir
        .join(format!("{:04}", date.year()))
        .join(format!("{:02}", date.month()))
        .join(format!("{:02}.log", date.day()))
}

/// Open (appending) today's log file, creating its directories
pub fn open_log_file(logs_dir: &Path) -> std::io::Result<(PathBuf, File)> {
    let path = log_file_path(logs_dir, Local::now().date_naive());
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((path, file))
}

/// Initialize tracing: console output plus, when `logs_dir` is given, a
/// plain-text copy in today's log file
///
/// A log file that cannot be opened is reported on the console and skipped.
pub fn init(logs_dir: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    let mut file_error = None;
    let file_layer = logs_dir.and_then(|dir| match open_log_file(dir) {
        Ok((_, file)) => Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file))),
        Err(e) => {
            file_error = Some(format!("{}: {}", dir.display(), e));
            None
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))?;

    if let Some(e) = file_error {
        tracing::warn!("File logging disabled, cannot open log file in {}", e);
    }

    Ok(())
}
