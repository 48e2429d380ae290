//! Wiring: config -> repository + player -> playback service

use crate::config::{SignageConfig, SourceKind};
use crate::error::{AppError, Result};
use signage_core::{VideoPlayer, VideoRepository};
use signage_playback::PlaybackService;
use signage_player::ProcessPlayer;
use signage_sync::{LocalDirectoryRepository, RemoteManifestRepository};
use std::sync::Arc;
use tracing::{info, warn};

/// Build the video source named by `source.kind`
pub fn build_repository(config: &SignageConfig) -> Result<Arc<dyn VideoRepository>> {
    match config.source.kind {
        SourceKind::Local => {
            info!("Using local videos from {}", config.source.local_dir.display());
            Ok(Arc::new(LocalDirectoryRepository::new(&config.source.local_dir)))
        }
        SourceKind::Remote => {
            let url = config
                .source
                .manifest_url
                .clone()
                .ok_or_else(|| AppError::Config("source.manifest_url is not set".to_string()))?;
            info!("Using remote manifest {}", url);

            let repository =
                RemoteManifestRepository::new(url, config.storage_layout(), config.request_timeout())?;
            Ok(Arc::new(repository))
        }
    }
}

/// Build the external process player
pub fn build_player(config: &SignageConfig) -> Result<Arc<dyn VideoPlayer>> {
    let player = ProcessPlayer::new(&config.player.program, config.player.args.iter())?;
    Ok(Arc::new(player))
}

/// Build a stopped playback service from configuration
pub fn build_service(config: &SignageConfig) -> Result<PlaybackService> {
    let repository = build_repository(config)?;
    let player = build_player(config)?;

    Ok(PlaybackService::new(
        repository,
        player,
        config.storage_layout(),
        config.playback_config(),
    ))
}

/// Run the signage loop until Ctrl-C or SIGTERM
pub async fn run(config: &SignageConfig) -> Result<()> {
    let service = build_service(config)?;

    info!("Starting video signage application");
    service.start().await?;

    let status = service.status();
    info!(
        "Video signage running ({} videos in playlist)",
        status.playlist_size
    );

    shutdown_signal().await;

    service.stop().await;
    info!("Application stopped");
    Ok(())
}

/// Resolves on Ctrl-C or, on unix, SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Ctrl-C handler unavailable: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let term = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("SIGTERM handler unavailable: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let term = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = term => {},
    }

    info!("Shutdown signal received");
}
