//! # Playlist Sequencer Module / 播放列表序列模块
//!
//! Turns an ordered list of identifier tokens into a timed traversal that
//! selects one node at a time. The sequencer itself is pure: it owns the
//! tokens, the position and whether the repeating timer is armed, while the
//! actual selection is delegated to a callback and the timer is driven by
//! `infra::ticker`.
//!
//! 将有序的标识符标记列表转换为定时遍历，每次选择一个节点。
//! 序列器本身是纯逻辑：它拥有标记、当前位置以及重复定时器是否启用，
//! 实际的选择委托给回调，定时器由 `infra::ticker` 驱动。

use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// Time between two automatic advances.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(3000);

/// How many unresolvable tokens one advance may move past. With a budget of
/// `n`, an advance that meets `n` misses in a row tries one more token; if
/// that one misses too it stalls on it (so `n + 1` lookups fail in one tick)
/// and the next tick continues after it.
pub const DEFAULT_MAX_SKIPS_PER_TICK: usize = 64;

/// Lifecycle of a playlist. `Finished` is terminal until the next `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlaybackState {
    Idle,
    Playing,
    Finished,
}

/// What a single start or advance step ended with.
/// 单次启动或前进步骤的结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The token at this index was resolved and selected.
    Selected(usize),
    /// The end of the list was reached; the timer is disarmed.
    Finished,
    /// The skip budget ran out on this (unresolved) index.
    Stalled(usize),
}

/// The "current / total" pair shown next to the playlist controls.
/// `current` is 1-based and 0 when nothing is being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlaylistStatus {
    pub current: usize,
    pub total: usize,
}

impl fmt::Display for PlaylistStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.total)
    }
}

/// Strips one leading `#` and then one leading `pw:` (any case) from a trimmed token.
///
/// 从修剪后的标记中去掉一个前导 `#`，然后去掉一个前导 `pw:`（不区分大小写）。
pub fn normalize_token(raw: &str) -> String {
    let token = raw.trim();
    let token = token.strip_prefix('#').unwrap_or(token);
    let token = match token.get(..3) {
        Some(prefix) if prefix.eq_ignore_ascii_case("pw:") => &token[3..],
        _ => token,
    };
    token.trim().to_string()
}

/// Splits raw playlist input on commas, newlines, carriage returns and runs
/// of spaces or tabs, normalizes each piece and drops empty ones.
///
/// 按逗号、换行、回车以及连续的空格或制表符拆分原始播放列表输入，规范化每一段并丢弃空段。
pub fn parse_tokens(raw: &str) -> Vec<String> {
    raw.split([',', '\n', '\r', ' ', '\t'])
        .map(normalize_token)
        .filter(|token| !token.is_empty())
        .collect()
}

/// The playlist state machine.
/// 播放列表状态机。
#[derive(Debug, Clone)]
pub struct Playlist {
    tokens: Vec<String>,
    /// `None` before the first selection; may equal `tokens.len()` once finished.
    index: Option<usize>,
    state: PlaybackState,
    timer_armed: bool,
    max_skips_per_tick: usize,
}

impl Default for Playlist {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SKIPS_PER_TICK)
    }
}

impl Playlist {
    pub fn new(max_skips_per_tick: usize) -> Self {
        Self {
            tokens: Vec::new(),
            index: None,
            state: PlaybackState::Idle,
            timer_armed: false,
            max_skips_per_tick,
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_timer_armed(&self) -> bool {
        self.timer_armed
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Replaces the token sequence without starting playback.
    pub fn set_tokens(&mut self, tokens: Vec<String>) {
        self.timer_armed = false;
        self.tokens = tokens;
        self.index = None;
        self.state = PlaybackState::Idle;
    }

    /// Starts (or restarts) playback at `start_index`, clamped into the list.
    ///
    /// The clamped token is selected right away; when it does not resolve the
    /// sequencer advances immediately instead of waiting for a tick. The timer
    /// is then armed unless that advance already finished the list. An empty
    /// `tokens` list is a no-op and returns `None`.
    ///
    /// 从 `start_index`（限制在列表范围内）开始（或重新开始）播放。
    /// 空的 `tokens` 列表不做任何操作并返回 `None`。
    pub fn start<F>(&mut self, tokens: Vec<String>, start_index: usize, mut select: F) -> Option<Advance>
    where
        F: FnMut(&str) -> bool,
    {
        if tokens.is_empty() {
            return None;
        }
        let index = start_index.min(tokens.len() - 1);
        self.timer_armed = false;
        self.tokens = tokens;
        self.index = Some(index);
        self.state = PlaybackState::Playing;

        let outcome = if select(&self.tokens[index]) {
            Advance::Selected(index)
        } else {
            self.advance(&mut select)
        };

        if self.state == PlaybackState::Playing {
            self.timer_armed = true;
        }
        tracing::debug!(?outcome, total = self.tokens.len(), "playlist started");
        Some(outcome)
    }

    /// Moves to the next token. Unresolvable tokens are skipped within the same
    /// call: up to `max_skips_per_tick` of them are moved past, and a further
    /// miss returns [`Advance::Stalled`] on that token without skipping it.
    /// Running past the end disarms the timer and finishes the playlist.
    ///
    /// 移动到下一个标记。无法解析的标记在同一次调用中被跳过，最多跳过每次触发的预算数量。
    /// 越过末尾会停用定时器并结束播放列表。
    pub fn advance<F>(&mut self, mut select: F) -> Advance
    where
        F: FnMut(&str) -> bool,
    {
        let mut skipped = 0;
        loop {
            let next = self.index.map_or(0, |index| index + 1);
            self.index = Some(next);

            if next >= self.tokens.len() {
                self.index = Some(self.tokens.len());
                self.timer_armed = false;
                self.state = PlaybackState::Finished;
                return Advance::Finished;
            }

            if select(&self.tokens[next]) {
                return Advance::Selected(next);
            }

            tracing::debug!(token = %self.tokens[next], "playlist token did not resolve, skipping");
            skipped += 1;
            if skipped > self.max_skips_per_tick {
                return Advance::Stalled(next);
            }
        }
    }

    /// Steps back one token (never below the first) and selects it. Unlike
    /// [`Playlist::advance`] a failed resolution is not skipped. Returns `None`
    /// for an empty playlist, otherwise whether the selection succeeded.
    pub fn previous<F>(&mut self, mut select: F) -> Option<bool>
    where
        F: FnMut(&str) -> bool,
    {
        if self.tokens.is_empty() {
            return None;
        }
        let index = self.index.map_or(0, |index| index.saturating_sub(1));
        self.index = Some(index);
        Some(select(&self.tokens[index]))
    }

    /// Disarms the timer. Idempotent.
    pub fn stop(&mut self) {
        self.timer_armed = false;
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Idle;
        }
    }

    /// Current position for display, derived from the index and the list length.
    pub fn status(&self) -> PlaylistStatus {
        let total = self.tokens.len();
        let current = match self.index {
            Some(index) if index < total => index + 1,
            _ => 0,
        };
        PlaylistStatus { current, total }
    }
}
