// SPDX-License-Identifier: MPL-2.0
//! Headless demo: replays a short scripted playback against a logging player.

use player_controls::config::{self, Config};
use player_controls::coordinator::HostCallbacks;
use player_controls::error::Result;
use player_controls::format::format_progress;
use player_controls::overlay::Message;
use player_controls::player::{LoggingPlayer, NativeEvent};
use player_controls::session::{Session, SessionHandle};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const PROGRESS_INTERVAL_MS: i64 = 250;
const DEFAULT_DURATION_MS: i64 = 12_000;

struct Args {
    config: Option<PathBuf>,
    duration_ms: i64,
    guarded: bool,
}

fn parse_args() -> std::result::Result<Args, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    Ok(Args {
        guarded: args.contains("--guarded"),
        config: args.opt_value_from_str("--config")?,
        duration_ms: args
            .opt_value_from_str("--duration-ms")?
            .unwrap_or(DEFAULT_DURATION_MS)
            .max(PROGRESS_INTERVAL_MS),
    })
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "player_controls=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("usage: player_controls [--config <path>] [--duration-ms <n>] [--guarded]");
            std::process::exit(2);
        }
    };

    let mut config = match &args.config {
        Some(path) => config::load_from_path(path)?,
        None => config::load()?,
    };
    if args.guarded {
        config.can_seek_unwatch = false;
    }
    if config.src.is_none() && config.sources.is_empty() {
        config.src = Some("demo://sample".to_string());
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(run(config, args.duration_ms))
}

async fn run(config: Config, duration_ms: i64) -> Result<()> {
    let callbacks = HostCallbacks::new()
        .on_player_finished(|| tracing::info!("host: playback finished"))
        .on_screen_rotation(|fullscreen| tracing::info!(fullscreen, "host: rotation"));

    let (session, handle) = Session::start(config, LoggingPlayer::new(), callbacks);
    let script = tokio::spawn(replay(handle, duration_ms));

    let coordinator = session.run().await?;
    if let Ok(Err(err)) = script.await {
        tracing::warn!(error = %err, "script stopped early");
    }

    tracing::info!(
        commands = coordinator.player().dispatched(),
        "demo complete"
    );
    Ok(())
}

/// Plays the media from start to end, with a tap, a drag-seek and a
/// fullscreen round trip along the way.
async fn replay(handle: SessionHandle, duration_ms: i64) -> Result<()> {
    handle.native(NativeEvent::BufferOk)?;
    handle.native(NativeEvent::Playing)?;

    let mut ticker = tokio::time::interval(Duration::from_millis(PROGRESS_INTERVAL_MS as u64));
    let mut current = 0;
    let mut step = 0;
    while current < duration_ms {
        ticker.tick().await;
        current = (current + PROGRESS_INTERVAL_MS).min(duration_ms);
        step += 1;
        handle.native(NativeEvent::Progress {
            current_ms: current,
            total_ms: duration_ms,
        })?;

        let (elapsed, total) = format_progress(current, duration_ms);
        tracing::trace!("{elapsed} / {total}");

        match step {
            // Controls have auto-hidden by now; bring them back.
            16 => handle.tap()?,
            20 => {
                let target = (duration_ms * 3 / 4) as f64;
                handle.overlay(Message::SeekPreview(target - 1_000.0))?;
                handle.overlay(Message::SeekPreview(target))?;
                handle.overlay(Message::SeekRelease(target))?;
            }
            24 => handle.overlay(Message::ToggleFullscreen)?,
            28 => handle.overlay(Message::ToggleFullscreen)?,
            _ => {}
        }
    }

    handle.native(NativeEvent::Finished)?;
    tokio::time::sleep(Duration::from_millis(PROGRESS_INTERVAL_MS as u64)).await;
    handle.dispose()
}
