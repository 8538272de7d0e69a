//! # Commands Module / 命令模块
//!
//! One submodule per CLI command, plus the shared step that builds the
//! application state from the selected export source.
//!
//! 每个 CLI 命令一个子模块，以及根据所选导出数据源构建应用状态的共享步骤。

use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::state::{AppState, SourceStatus};
use crate::core::tree::Catalog;
use crate::infra::config::{ViewerConfig, expand_path};
use crate::infra::source::{DirSource, HttpSource, ingest_local_file};
use crate::reporting::console::print_source_status;

pub mod export;
pub mod init;
pub mod play;
pub mod show;
pub mod tree;
pub mod width;

/// Where the catalog should be loaded from. At most one field is set; none
/// means the configured directory, if any, or else the built-in catalog.
///
/// 目录的加载来源。最多设置一个字段；都未设置时使用配置的目录（如有），否则使用内置目录。
#[derive(Debug, Clone, Default)]
pub struct SourceArgs {
    pub file: Option<PathBuf>,
    /// `Some("")` means "the configured base URL".
    pub remote: Option<String>,
    pub dir: Option<PathBuf>,
}

/// Builds the application state, loading the requested export on top of the
/// built-in catalog. A load that fails leaves the built-in catalog in place
/// and prints the status line.
///
/// 构建应用状态，在内置目录之上加载所请求的导出。加载失败时保留内置目录并打印状态行。
pub async fn prepare_state(config: &ViewerConfig, sources: &SourceArgs, locale: &str) -> Result<AppState> {
    let mut state = AppState::new(Catalog::seed(), config.playlist.max_skips_per_tick);

    if let Some(file) = &sources.file {
        let path = expand_path(file);
        let origin = path.display().to_string();
        match ingest_local_file(&path).await {
            Ok(nodes) => state.replace_catalog(nodes, SourceStatus::LocalFile(origin)),
            Err(e) => state.report_import_error(&origin, &e),
        }
    } else if let Some(remote) = &sources.remote {
        let base_url = if remote.is_empty() {
            config.source.base_url.as_str()
        } else {
            remote.as_str()
        };
        let source = HttpSource::new(base_url, Duration::from_secs(config.source.timeout_secs))?;
        state.import_remote(&source).await;
    } else if let Some(dir) = sources.dir.as_ref().or(config.source.dir.as_ref()) {
        let source = DirSource::new(expand_path(dir));
        state.import_remote(&source).await;
    }

    print_source_status(state.source_status(), locale);
    Ok(state)
}
