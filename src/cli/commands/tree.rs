//! # Tree Command Module / 树命令模块
//!
//! Prints the catalog as a tree, filtered and highlighted for an optional query.
//!
//! 以树形式打印目录，并根据可选查询进行过滤和高亮。

use anyhow::Result;
use colored::*;

use super::{SourceArgs, prepare_state};
use crate::infra::config::ViewerConfig;
use crate::infra::t;
use crate::reporting::console::print_tree;

pub async fn execute(config: &ViewerConfig, sources: &SourceArgs, query: &str, locale: &str) -> Result<()> {
    let mut state = prepare_state(config, sources, locale).await?;
    state.set_query(query);

    let view = state.view();
    print_tree(&view, state.query(), locale);

    println!(
        "\n{}",
        t!(
            "tree.summary",
            locale = locale,
            roots = state.catalog().len(),
            tests = state.catalog().total_leaves()
        )
        .dimmed()
    );
    Ok(())
}
