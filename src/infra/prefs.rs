//! # Preferences Module / 偏好设置模块
//!
//! A tiny persisted key-value store (a JSON object of strings, like a
//! browser's local storage) and the panel-width preference kept in it.
//! Reading tolerates missing or corrupt files; writing failures are logged and
//! ignored by the panel-width helpers.
//!
//! 一个很小的持久化键值存储（字符串组成的 JSON 对象，类似浏览器的 local storage）
//! 以及保存在其中的面板宽度偏好。读取可容忍缺失或损坏的文件；面板宽度辅助函数会记录并忽略写入失败。

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

/// Key under which the left panel width is stored.
pub const PANEL_WIDTH_KEY: &str = "e2e.leftPanelWidthPx";
pub const MIN_LEFT_PX: i64 = 180;
pub const MAX_LEFT_PX: i64 = 1000;
/// Width used when nothing usable is stored.
pub const DEFAULT_LEFT_PX: i64 = 320;
/// Keyboard nudge step, and the larger step used with Shift.
pub const KEY_STEP_PX: i64 = 8;
pub const KEY_SHIFT_STEP_PX: i64 = 20;

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to persist preferences: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// A JSON-file backed key-value store.
/// 基于 JSON 文件的键值存储。
#[derive(Debug, Clone)]
pub struct PrefStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl PrefStore {
    /// Opens the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::debug!(path = %path.display(), error = %e, "ignoring unreadable preferences");
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Stores `value` under `key` and writes the file atomically.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), PrefsError> {
        self.entries.insert(key.to_string(), value.into());
        self.flush()
    }

    fn flush(&self) -> Result<(), PrefsError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;
        let mut file = NamedTempFile::new_in(&dir)?;
        file.write_all(serde_json::to_string_pretty(&self.entries)?.as_bytes())?;
        file.persist(&self.path)?;
        Ok(())
    }
}

/// Direction of a keyboard nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nudge {
    Left,
    Right,
}

/// Reads the stored panel width. Absent or non-numeric values yield `None`.
///
/// Like `parseInt`, a leading integer is accepted even when followed by other
/// text (`"240px"` reads as 240).
pub fn load_panel_width(store: &PrefStore) -> Option<i64> {
    store.get(PANEL_WIDTH_KEY).and_then(parse_leading_int)
}

/// The stored width, or [`DEFAULT_LEFT_PX`].
pub fn panel_width_or_default(store: &PrefStore) -> i64 {
    load_panel_width(store).unwrap_or(DEFAULT_LEFT_PX)
}

/// Persists `px`. Failures are logged and otherwise ignored.
pub fn save_panel_width(store: &mut PrefStore, px: i64) {
    if let Err(e) = store.set(PANEL_WIDTH_KEY, px.to_string()) {
        tracing::debug!(path = %store.path().display(), error = %e, "failed to save panel width");
    }
}

pub fn clamp_width(px: i64) -> i64 {
    px.clamp(MIN_LEFT_PX, MAX_LEFT_PX)
}

/// Width after dragging the resizer from `start_x` to `client_x`.
pub fn drag_width(start_width: i64, start_x: i64, client_x: i64) -> i64 {
    clamp_width(start_width.saturating_add(client_x.saturating_sub(start_x)))
}

/// Width after one arrow-key press.
pub fn nudge_width(current: i64, direction: Nudge, shift: bool) -> i64 {
    let step = if shift { KEY_SHIFT_STEP_PX } else { KEY_STEP_PX };
    let delta = match direction {
        Nudge::Left => -step,
        Nudge::Right => step,
    };
    clamp_width(current.saturating_add(delta))
}

fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_int_parsing() {
        assert_eq!(parse_leading_int("240"), Some(240));
        assert_eq!(parse_leading_int("  240px"), Some(240));
        assert_eq!(parse_leading_int("-12"), Some(-12));
        assert_eq!(parse_leading_int("px240"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
    }
}
