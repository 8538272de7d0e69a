//! # Play Command Module / 播放命令模块
//!
//! Runs a playlist: selects each token in turn on a fixed interval, printing
//! the selected node and the playlist position as view events arrive. Ctrl-C
//! stops the playback.
//!
//! 运行播放列表：按固定间隔依次选择每个标记，并在视图事件到达时打印所选节点和播放列表位置。
//! Ctrl-C 会停止播放。

use anyhow::Result;
use colored::*;
use std::time::Duration;
use tokio::signal;
use tokio::sync::broadcast::Receiver;
use tokio_util::sync::CancellationToken;

use super::{SourceArgs, prepare_state};
use crate::core::playlist::{Advance, PlaybackState};
use crate::core::state::{AppState, ViewEvent};
use crate::infra::config::ViewerConfig;
use crate::infra::t;
use crate::infra::ticker::drive_playlist;
use crate::reporting::console::print_playlist_status;

pub async fn execute(
    config: &ViewerConfig,
    sources: &SourceArgs,
    tokens: &[String],
    interval_ms: Option<u64>,
    start: usize,
    locale: &str,
) -> Result<()> {
    let mut state = prepare_state(config, sources, locale).await?;
    let period = interval_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.playlist.interval());

    state.load_playlist(&tokens.join(","));
    if state.playlist().is_empty() {
        println!("{}", t!("playlist.empty", locale = locale).yellow());
        return Ok(());
    }

    let mut events = state.subscribe();
    let stop_token = setup_signal_handler(locale);

    let first = state.start_playlist(start);
    drain_events(&mut events, &state, locale);
    if let Some(Advance::Stalled(index)) = first {
        report_stall(&state, index, locale);
    }

    let final_state = drive_playlist(&mut state, period, stop_token, |state, outcome| {
        drain_events(&mut events, state, locale);
        if let Advance::Stalled(index) = outcome {
            report_stall(state, index, locale);
        }
    })
    .await;

    match final_state {
        PlaybackState::Finished => println!("\n{}", t!("playlist.finished", locale = locale).green().bold()),
        _ => println!("\n{}", t!("playlist.stopped", locale = locale).yellow()),
    }
    Ok(())
}

/// Prints every pending view event relevant to playback.
fn drain_events(events: &mut Receiver<ViewEvent>, state: &AppState, locale: &str) {
    while let Ok(event) = events.try_recv() {
        match event {
            ViewEvent::Selected { id, path } => {
                let name = state
                    .catalog()
                    .find_exact(&id)
                    .map(|node| node.name.clone())
                    .unwrap_or_default();
                println!(
                    "{} {}  {}",
                    "▶".green(),
                    name.bold(),
                    path.join(" › ").dimmed()
                );
            }
            ViewEvent::PlaylistPosition(status) => print_playlist_status(status, locale),
            _ => {}
        }
    }
}

fn report_stall(state: &AppState, index: usize, locale: &str) {
    let token = state
        .playlist()
        .tokens()
        .get(index)
        .cloned()
        .unwrap_or_default();
    println!(
        "{}",
        t!("playlist.stalled", locale = locale, token = token).yellow()
    );
}

fn setup_signal_handler(locale: &str) -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();
    let locale = locale.to_string();

    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            println!("\n{}", t!("playlist.shutdown_signal", locale = &locale).yellow());
            token_clone.cancel();
        }
    });

    token
}
