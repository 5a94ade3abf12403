//! Gaze Player - Main Entry Point

use anyhow::Context;
use app::{init_logging, AppConfig, LogSink, ScriptedPerception, StatusReporter};
use playback::SimulatedPlayer;
use session::Session;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    info!("=== Gaze Player v{} ===", env!("CARGO_PKG_VERSION"));
    let config = AppConfig::load().context("Failed to load configuration")?;

    let player = Arc::new(SimulatedPlayer::new());
    let (session, handle) = Session::new(config.session.clone(), Arc::clone(&player), LogSink)?;
    let session_task = tokio::spawn(session.run());

    // Player widget finishes starting up in the background
    let starting_player = Arc::clone(&player);
    let ready_after = Duration::from_millis(config.player_ready_after_ms);
    tokio::spawn(async move {
        tokio::time::sleep(ready_after).await;
        starting_player.set_ready(true);
    });

    match &config.video {
        Some(input) => handle.load_text(input.clone()).await?,
        None => handle.load_sample(0).await?,
    }

    let mut perception = ScriptedPerception::new(config.script.clone());
    let mut frames = tokio::time::interval(Duration::from_millis(config.frame_interval_ms.max(1)));
    let mut status = handle.subscribe();
    let mut reporter = StatusReporter::default();

    let deadline = tokio::time::sleep(Duration::from_secs(config.run_seconds));
    tokio::pin!(deadline);

    info!("Running for {}s", config.run_seconds);
    loop {
        tokio::select! {
            _ = &mut deadline => break,
            _ = frames.tick() => handle.submit_frame(perception.next_frame()),
            changed = status.changed() => {
                if changed.is_err() {
                    break;
                }
                let current = status.borrow_and_update().clone();
                reporter.report(&current);
            }
        }
    }

    let summary = handle.status();
    info!(
        "Focus over {} samples: {:.0}% playing",
        summary.samples,
        summary.focus_ratio * 100.0
    );

    handle.shutdown().await?;
    session_task.await?;
    Ok(())
}
