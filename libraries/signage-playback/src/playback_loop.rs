//! Background playback loop
//!
//! Per video:
//!
//! ```text
//! Selecting -> Starting -> Waiting{Opening|Buffering|Playing}
//!     -> {Ended|Error|Stopped|TimedOut|Invalidated} -> Selecting
//! ```
//!
//! The loop has no terminal state while the service runs. Nothing a single
//! video does (missing file, refused start, player error, hang) stops it.

use crate::context::{panic_message, sleep_or_cancel, ServiceContext};
use crate::types::PlaybackOutcome;
use futures_util::FutureExt;
use signage_core::{PlayerStatus, Video};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Result of one pass through the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Playlist had nothing to offer
    Empty,
    /// Selected video's file is missing
    Invalid,
    /// Player refused to start the video
    StartFailed,
    /// Video was driven to an outcome after `polls` status checks
    Played {
        outcome: PlaybackOutcome,
        polls: u32,
    },
}

pub(crate) async fn run(ctx: Arc<ServiceContext>, shutdown: CancellationToken) {
    info!("Video playback loop started");

    while ctx.is_running() {
        let delay = match AssertUnwindSafe(play_next(&ctx, &shutdown))
            .catch_unwind()
            .await
        {
            Ok(step) => delay_after(step, &ctx),
            Err(panic) => {
                error!("Playback error: {}", panic_message(&*panic));
                ctx.config.retry_delay()
            }
        };

        ctx.set_current_video(None);

        if !delay.is_zero() && !sleep_or_cancel(delay, &shutdown).await {
            break;
        }
    }

    ctx.set_current_video(None);
    info!("Video playback loop stopped");
}

fn delay_after(step: Step, ctx: &ServiceContext) -> Duration {
    match step {
        Step::Empty => ctx.config.empty_playlist_delay(),
        Step::Invalid | Step::StartFailed => ctx.config.retry_delay(),
        // Finished before the first tick: the player never got going
        Step::Played { polls: 1, .. } => ctx.config.retry_delay(),
        Step::Played { .. } => Duration::ZERO,
    }
}

async fn play_next(ctx: &ServiceContext, shutdown: &CancellationToken) -> Step {
    let Some(video) = ctx.playlist.next() else {
        warn!("No videos available in playlist");
        return Step::Empty;
    };

    // Removal of dead entries belongs to the sync loop
    if !video.is_valid() {
        error!("Invalid video file: {}", video.path.display());
        return Step::Invalid;
    }

    if !ctx.is_running() {
        return Step::Played {
            outcome: PlaybackOutcome::Cancelled,
            polls: 0,
        };
    }

    info!("Playing video: {}", video.name);
    ctx.set_current_video(Some(video.clone()));

    if !ctx.player.play(&video.path) {
        error!("Player could not start video: {}", video.name);
        return Step::StartFailed;
    }

    // stop() may have stopped the player just before play() went through
    if !ctx.is_running() {
        ctx.player.stop();
        return Step::Played {
            outcome: PlaybackOutcome::Cancelled,
            polls: 0,
        };
    }

    let (outcome, polls) = wait_for_completion(ctx, &video, shutdown).await;
    match outcome {
        PlaybackOutcome::Ended => info!("Finished video: {}", video.name),
        PlaybackOutcome::Failed => error!("Player reported an error for video: {}", video.name),
        PlaybackOutcome::Stopped => info!("Playback stopped for video: {}", video.name),
        PlaybackOutcome::TimedOut => warn!(
            "Video {} exceeded the maximum wait of {:?}, moving on",
            video.name,
            ctx.config.max_wait()
        ),
        PlaybackOutcome::Invalidated => {
            warn!("Video file removed during playback: {}", video.path.display());
        }
        PlaybackOutcome::Cancelled => debug!("Playback of {} interrupted by shutdown", video.name),
    }

    Step::Played { outcome, polls }
}

/// Poll the player once per tick until the video reaches an outcome
///
/// Returns the outcome and the number of status polls it took.
async fn wait_for_completion(
    ctx: &ServiceContext,
    video: &Video,
    shutdown: &CancellationToken,
) -> (PlaybackOutcome, u32) {
    let started = Instant::now();
    let max_wait = ctx.config.max_wait();
    let mut polls = 0;

    loop {
        if !ctx.is_running() {
            return (PlaybackOutcome::Cancelled, polls);
        }

        polls += 1;

        if !video.is_valid() {
            return (PlaybackOutcome::Invalidated, polls);
        }

        match ctx.player.status() {
            PlayerStatus::Ended => return (PlaybackOutcome::Ended, polls),
            PlayerStatus::Error => return (PlaybackOutcome::Failed, polls),
            PlayerStatus::Stopped => return (PlaybackOutcome::Stopped, polls),
            // Opening, Buffering, Playing and anything else keep us waiting
            _ => {}
        }

        if started.elapsed() >= max_wait {
            return (PlaybackOutcome::TimedOut, polls);
        }

        if !sleep_or_cancel(ctx.config.tick, shutdown).await {
            return (PlaybackOutcome::Cancelled, polls);
        }
    }
}
