//! # Playlist Timer Module / 播放列表定时器模块
//!
//! Drives a started playlist with a repeating tokio interval. Each tick reads
//! the current `AppState` (never a snapshot) and advances it; the loop ends
//! when the playlist disarms its timer or the cancellation token fires.
//!
//! 使用重复的 tokio 定时器驱动已启动的播放列表。每次触发都读取当前的 `AppState`（而非快照）并推进；
//! 当播放列表停用定时器或取消令牌触发时循环结束。

use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::IntervalStream;
use tokio_util::sync::CancellationToken;

use crate::core::playlist::{Advance, PlaybackState};
use crate::core::state::AppState;

/// Shortest period the timer runs with; shorter (zero) periods are raised to it.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Runs the playlist timer until the playlist finishes or `cancel` fires.
/// `on_tick` sees the state after every advance.
///
/// The first advance happens one full `period` after the call, matching a
/// repeating timer armed right after the initial selection.
///
/// 运行播放列表定时器，直到播放列表结束或 `cancel` 触发。每次推进后 `on_tick` 都能看到状态。
pub async fn drive_playlist<F>(
    state: &mut AppState,
    period: Duration,
    cancel: CancellationToken,
    mut on_tick: F,
) -> PlaybackState
where
    F: FnMut(&AppState, Advance),
{
    let period = period.max(MIN_PERIOD);
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut ticks = IntervalStream::new(interval);

    while state.playlist().is_timer_armed() {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("playlist cancelled");
                state.stop_playlist();
                break;
            }
            tick = ticks.next() => {
                if tick.is_none() {
                    break;
                }
                if let Some(outcome) = state.tick_playlist() {
                    on_tick(state, outcome);
                }
            }
        }
    }
    state.playlist_state()
}
