//! # Configuration Module / 配置模块
//!
//! Loads the optional `CatalogViewer.toml` file. Every setting has a default,
//! so a missing default file simply yields [`ViewerConfig::default`].
//!
//! 加载可选的 `CatalogViewer.toml` 文件。每个设置都有默认值，
//! 因此缺少默认文件时直接得到 [`ViewerConfig::default`]。

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::playlist::{DEFAULT_INTERVAL, DEFAULT_MAX_SKIPS_PER_TICK};
use crate::infra::t;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "CatalogViewer.toml";

/// The whole viewer configuration.
/// 查看器的完整配置。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ViewerConfig {
    /// The language for the viewer's output messages (e.g., "en", "pl").
    /// Defaults to "en" if not specified.
    ///
    /// 查看器输出消息的语言（例如 "en", "pl"）。如果未指定，则默认为 "en"。
    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default)]
    pub playlist: PlaylistConfig,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub prefs: PrefsConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            playlist: PlaylistConfig::default(),
            source: SourceConfig::default(),
            prefs: PrefsConfig::default(),
        }
    }
}

/// `[playlist]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaylistConfig {
    /// Milliseconds between two automatic advances.
    pub interval_ms: u64,
    /// Unresolvable tokens one tick may skip before waiting for the next tick.
    pub max_skips_per_tick: usize,
}

impl Default for PlaylistConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL.as_millis() as u64,
            max_skips_per_tick: DEFAULT_MAX_SKIPS_PER_TICK,
        }
    }
}

impl PlaylistConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// `[source]` table: where remote discovery looks for exports.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Base URL of the server-hosted export directory.
    pub base_url: String,
    /// A local directory laid out like the server-hosted one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    /// Request timeout for remote fetches.
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/xray/".to_string(),
            dir: None,
            timeout_secs: 10,
        }
    }
}

/// `[prefs]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PrefsConfig {
    /// JSON file holding persisted UI preferences.
    pub path: PathBuf,
}

impl Default for PrefsConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".catalog-viewer/prefs.json"),
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

/// Loads the configuration.
///
/// With an explicit `path` the file must exist. Without one, `CatalogViewer.toml`
/// in the working directory is used when present, defaults otherwise.
///
/// 加载配置。显式给出 `path` 时文件必须存在；否则若工作目录中存在 `CatalogViewer.toml` 则使用它，不存在则使用默认值。
pub fn load(path: Option<&Path>, locale: &str) -> Result<ViewerConfig> {
    let config_path = match path {
        Some(path) => expand_path(path),
        None => {
            let candidate = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !candidate.is_file() {
                return Ok(ViewerConfig::default());
            }
            candidate
        }
    };

    let content = fs::read_to_string(&config_path).with_context(|| {
        t!("config.read_failed", locale = locale, path = config_path.display()).to_string()
    })?;
    parse(&content).with_context(|| {
        t!("config.parse_failed", locale = locale, path = config_path.display()).to_string()
    })
}

/// Parses a configuration document.
///
/// A zero `[playlist] interval_ms` is rejected: the playlist timer needs a
/// non-zero period.
pub fn parse(content: &str) -> Result<ViewerConfig> {
    let config: ViewerConfig = toml::from_str(content)?;
    ensure!(
        config.playlist.interval_ms > 0,
        "[playlist] interval_ms must be at least 1"
    );
    Ok(config)
}

/// Expands a leading `~` and environment variables in a user-supplied path.
/// Paths that fail to expand are returned unchanged.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(&raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(e) => {
            tracing::debug!(path = %raw, error = %e, "path expansion failed");
            path.to_path_buf()
        }
    }
}
