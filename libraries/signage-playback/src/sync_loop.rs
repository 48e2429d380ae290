//! Background synchronization loop
//!
//! Syncs the repository, reloads the playlist, sleeps, repeats. Failures are
//! retried forever at the same interval.

use crate::context::{panic_message, sleep_or_cancel, ServiceContext};
use futures_util::FutureExt;
use signage_core::Result;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

pub(crate) async fn run(ctx: Arc<ServiceContext>, shutdown: CancellationToken) {
    info!("Video synchronization loop started");

    while ctx.is_running() {
        match AssertUnwindSafe(sync_once(&ctx)).catch_unwind().await {
            Ok(Ok(count)) => info!("Video synchronization completed ({} videos)", count),
            Ok(Err(e)) => error!("Video synchronization failed: {}", e),
            Err(panic) => error!("Video synchronization panicked: {}", panic_message(&*panic)),
        }

        if !sleep_or_cancel(ctx.config.sync_interval, &shutdown).await {
            break;
        }
    }

    info!("Video synchronization loop stopped");
}

/// One sync pass: repository sync, then a full playlist reload
async fn sync_once(ctx: &ServiceContext) -> Result<usize> {
    info!("Starting video synchronization");
    ctx.repository.sync_videos().await?;
    Ok(ctx.load_videos().await)
}
