/// Application configuration
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use signage_core::StorageLayout;
use signage_playback::PlaybackConfig;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "signage.toml";

/// Prefix of environment overrides, e.g. `SIGNAGE_PLAYBACK__SHUFFLE=true`
pub const ENV_PREFIX: &str = "SIGNAGE";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SignageConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub playback: PlaybackSettings,

    #[serde(default)]
    pub source: SourceSettings,

    #[serde(default)]
    pub player: PlayerSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_videos_dir")]
    pub videos_dir: PathBuf,

    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    #[serde(default = "default_logs_dir")]
    pub logs_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_sync_interval_secs")]
    pub sync_interval_secs: u64,

    #[serde(default)]
    pub shuffle: bool,

    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,

    #[serde(default = "default_max_wait_ticks")]
    pub max_wait_ticks: u32,

    #[serde(default = "default_join_timeout_secs")]
    pub join_timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Play the files of a local folder
    #[default]
    Local,
    /// Mirror a remote manifest into `storage.videos_dir`
    Remote,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceSettings {
    #[serde(default)]
    pub kind: SourceKind,

    #[serde(default = "default_local_dir")]
    pub local_dir: PathBuf,

    #[serde(default)]
    pub manifest_url: Option<String>,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerSettings {
    #[serde(default = "default_program")]
    pub program: PathBuf,

    #[serde(default = "default_args")]
    pub args: Vec<String>,
}

impl SignageConfig {
    /// Load configuration from file and environment
    ///
    /// `path` must exist when given. Without it, `signage.toml` in the
    /// working directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Like `load`, but reading overrides from `env` instead of the process
    /// environment when it is given
    pub fn load_with_env(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) if !path.is_file() => {
                return Err(AppError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => {
                settings = settings.add_source(config::File::from(path));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (SIGNAGE_<SECTION>__<KEY>)
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .list_separator(" ")
                .with_list_parse_key("player.args")
                .try_parsing(true)
                .source(env),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let has_manifest_url = self
            .source
            .manifest_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty());
        if self.source.kind == SourceKind::Remote && !has_manifest_url {
            return Err(AppError::Config(
                "source.manifest_url is required for a remote source (set SIGNAGE_SOURCE__MANIFEST_URL)"
                    .to_string(),
            ));
        }

        if self.playback.tick_millis == 0 {
            return Err(AppError::Config("playback.tick_millis must be > 0".to_string()));
        }

        if self.playback.max_wait_ticks == 0 {
            return Err(AppError::Config("playback.max_wait_ticks must be > 0".to_string()));
        }

        if self.playback.sync_interval_secs == 0 {
            return Err(AppError::Config(
                "playback.sync_interval_secs must be > 0".to_string(),
            ));
        }

        if self.playback.join_timeout_secs == 0 {
            return Err(AppError::Config(
                "playback.join_timeout_secs must be > 0".to_string(),
            ));
        }

        if self.source.request_timeout_secs == 0 {
            return Err(AppError::Config(
                "source.request_timeout_secs must be > 0".to_string(),
            ));
        }

        if self.player.program.as_os_str().is_empty() {
            return Err(AppError::Config("player.program must be set".to_string()));
        }

        Ok(())
    }

    pub fn storage_layout(&self) -> StorageLayout {
        StorageLayout::new(&self.storage.videos_dir, &self.storage.cache_dir)
    }

    pub fn playback_config(&self) -> PlaybackConfig {
        PlaybackConfig {
            sync_interval: Duration::from_secs(self.playback.sync_interval_secs),
            shuffle: self.playback.shuffle,
            tick: Duration::from_millis(self.playback.tick_millis),
            max_wait_ticks: self.playback.max_wait_ticks,
            join_timeout: Duration::from_secs(self.playback.join_timeout_secs),
            ..PlaybackConfig::default()
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.source.request_timeout_secs)
    }
}

// Default values
fn default_videos_dir() -> PathBuf {
    PathBuf::from("videos")
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("cache")
}

fn default_logs_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_sync_interval_secs() -> u64 {
    30
}

fn default_tick_millis() -> u64 {
    1000
}

fn default_max_wait_ticks() -> u32 {
    300
}

fn default_join_timeout_secs() -> u64 {
    5
}

fn default_local_dir() -> PathBuf {
    PathBuf::from("test_videos")
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_program() -> PathBuf {
    PathBuf::from("cvlc")
}

fn default_args() -> Vec<String> {
    signage_player::VLC_ARGS
        .iter()
        .map(|arg| (*arg).to_string())
        .collect()
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            videos_dir: default_videos_dir(),
            cache_dir: default_cache_dir(),
            logs_dir: default_logs_dir(),
        }
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            sync_interval_secs: default_sync_interval_secs(),
            shuffle: false,
            tick_millis: default_tick_millis(),
            max_wait_ticks: default_max_wait_ticks(),
            join_timeout_secs: default_join_timeout_secs(),
        }
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            kind: SourceKind::Local,
            local_dir: default_local_dir(),
            manifest_url: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
        }
    }
}
