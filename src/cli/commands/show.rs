//! # Show Command Module / 显示命令模块
//!
//! Resolves a token (raw id, `#id`, `pw:id`, partial or "file:line" id, or a
//! name fragment) and prints the details panel of the node it names.
//!
//! 解析一个标记并打印其所指节点的详情面板。

use anyhow::{Result, bail};

use super::{SourceArgs, prepare_state};
use crate::core::playlist::normalize_token;
use crate::infra::config::ViewerConfig;
use crate::infra::t;
use crate::reporting::console::print_details;

pub async fn execute(config: &ViewerConfig, sources: &SourceArgs, token: &str, locale: &str) -> Result<()> {
    let mut state = prepare_state(config, sources, locale).await?;

    let token = normalize_token(token);
    if !state.select(&token) {
        bail!("{}", t!("show.not_found", locale = locale, token = token));
    }

    if let Some(details) = state.selection_details() {
        print_details(&details, locale);
    }
    Ok(())
}
