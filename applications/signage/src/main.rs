/// Signage Player - unattended video signage
use clap::{Parser, Subcommand};
use signage::{app, logging, SignageConfig};
use signage_sync::VideoScanner;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "signage")]
#[command(about = "Plays a folder or remote manifest of videos forever", long_about = None)]
struct Cli {
    /// Defaults to `run` with the default configuration lookup
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start synchronization and playback
    Run {
        /// Configuration file path
        #[arg(short, long, env = "SIGNAGE_CONFIG")]
        config: Option<PathBuf>,
    },
    /// List the video files a local source would play
    Scan {
        /// Directory path to scan
        path: PathBuf,
    },
    /// Load and validate configuration, then print it
    CheckConfig {
        /// Configuration file path
        #[arg(short, long, env = "SIGNAGE_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            run(None).await?;
        }
        Some(Commands::Run { config }) => {
            run(config.as_deref()).await?;
        }
        Some(Commands::Scan { path }) => {
            logging::init(None)?;
            scan_directory(&path)?;
        }
        Some(Commands::CheckConfig { config }) => {
            logging::init(None)?;
            check_config(config.as_deref())?;
        }
    }

    Ok(())
}

async fn run(config_path: Option<&Path>) -> anyhow::Result<()> {
    // Load configuration
    let config = SignageConfig::load(config_path)?;
    config.validate()?;

    logging::init(Some(&config.storage.logs_dir))?;

    if let Err(e) = app::run(&config).await {
        tracing::error!("Application failed: {}", e);
        return Err(e.into());
    }

    Ok(())
}

fn scan_directory(path: &Path) -> anyhow::Result<()> {
    let videos = VideoScanner::new().scan_videos(path)?;

    println!("{} videos in {}:", videos.len(), path.display());
    for video in videos {
        println!("  {}  {}  ({} bytes)", video.id, video.name, video.size);
    }

    Ok(())
}

fn check_config(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = SignageConfig::load(config_path)?;
    config.validate()?;

    println!("{}", serde_json::to_string_pretty(&config)?);
    tracing::info!("Configuration is valid");
    Ok(())
}
