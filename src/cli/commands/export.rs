//! # Export Command Module / 导出命令模块
//!
//! Writes the (optionally filtered) view-tree as a standalone HTML page.
//!
//! 将（可选过滤的）视图树写为独立的 HTML 页面。

use anyhow::Result;
use colored::*;
use std::path::Path;

use super::{SourceArgs, prepare_state};
use crate::infra::config::{ViewerConfig, expand_path};
use crate::infra::prefs::{PrefStore, panel_width_or_default};
use crate::infra::t;
use crate::reporting::html::generate_html_view;

pub async fn execute(
    config: &ViewerConfig,
    sources: &SourceArgs,
    out: &Path,
    query: &str,
    locale: &str,
) -> Result<()> {
    let mut state = prepare_state(config, sources, locale).await?;
    state.set_query(query);

    let store = PrefStore::open(expand_path(&config.prefs.path));
    let panel_width = panel_width_or_default(&store);

    let view = state.view();
    generate_html_view(&view, state.query(), state.source_status(), panel_width, out, locale)?;

    println!(
        "{}",
        t!("export.written", locale = locale, path = out.display()).green()
    );
    Ok(())
}
