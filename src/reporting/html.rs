//! # HTML Reporting Module / HTML 报告模块
//!
//! This module writes a self-contained HTML page of the view-tree: a
//! collapsible list with highlighted search matches and a details pane that
//! shows the node clicked in the tree.
//!
//! 此模块生成视图树的独立 HTML 页面：带有高亮搜索匹配的可折叠列表，以及显示树中所点击节点的详情面板。

use anyhow::{Context, Result};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;

use crate::core::filter::highlight;
use crate::core::models::Node;
use crate::core::state::SourceStatus;
use crate::core::tree::count_leaves;
use crate::infra::t;
use crate::reporting::console::source_status_text;

/// Embedded CSS styles for the viewer page / 查看器页面的嵌入式 CSS 样式
const HTML_STYLE: &str = include_str!("assets/viewer.css");

/// Embedded JavaScript for expanding rows and showing details / 用于展开行和显示详情的嵌入式 JavaScript
const HTML_SCRIPT: &str = include_str!("assets/viewer.js");

/// Renders the page for a view-tree.
///
/// # Arguments / 参数
/// * `nodes` - The (already filtered) view-tree / 已过滤的视图树
/// * `query` - The query to highlight, empty for none / 要高亮的查询，空表示无
/// * `source` - The source status shown under the title / 标题下显示的数据源状态
/// * `panel_width` - Width of the tree panel in pixels / 树面板的像素宽度
/// * `locale` - The locale to use for internationalization / 用于国际化的语言环境
pub fn render_html_view(
    nodes: &[Node],
    query: &str,
    source: &SourceStatus,
    panel_width: i64,
    locale: &str,
) -> Markup {
    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (t!("html.title", locale = locale)) }
                style { (PreEscaped(HTML_STYLE)) }
                style { (PreEscaped(format!(":root {{ --left-width: {panel_width}px; }}"))) }
            }
            body {
                header {
                    h1 { (t!("html.title", locale = locale)) }
                    p class="source-status" { (source_status_text(source, locale)) }
                    @if !query.is_empty() {
                        p class="query" { (t!("html.query", locale = locale, query = query)) }
                    }
                }
                main class="layout" {
                    section class="left-panel" id="tree" {
                        @if nodes.is_empty() {
                            div class="no-results" { (t!("tree.no_results", locale = locale)) }
                        } @else {
                            (render_list(nodes, query))
                        }
                    }
                    section class="right-panel" {
                        div class="empty" { (t!("html.pick_a_test", locale = locale)) }
                        div class="detail-meta" style="display:none" {
                            dl {
                                dt { (t!("details.id", locale = locale)) } dd id="detail-id" {}
                                dt { (t!("details.name", locale = locale)) } dd id="detail-name" {}
                                dt { (t!("details.description", locale = locale)) } dd id="detail-description" {}
                                dt { (t!("details.length", locale = locale)) } dd id="detail-length" {}
                            }
                            pre id="detail-json" {}
                        }
                    }
                }
                footer { (t!("html.generated_at", locale = locale, time = generated)) }
                script type="application/json" id="no-description" {
                    (PreEscaped(serde_json::to_string(&t!("details.no_description", locale = locale)).unwrap_or_default()))
                }
                script { (PreEscaped(HTML_SCRIPT)) }
            }
        }
    }
}

fn render_list(nodes: &[Node], query: &str) -> Markup {
    html! {
        ul class="tree-list" {
            @for node in nodes {
                li class="tree-item" data-id=(node.id) {
                    div class="tree-row" {
                        @if node.is_suite() {
                            button class="expander" { "−" }
                        } @else {
                            button class="expander no-child" disabled {}
                        }
                        span class="test-name"
                            data-id=(node.id)
                            data-name=(node.name)
                            data-description=(node.description_text())
                            data-length=(count_leaves(node))
                            data-json=(node.to_pretty_json()) {
                            (PreEscaped(highlight(&node.name, query)))
                        }
                    }
                    @if node.is_suite() {
                        (render_list(node.children(), query))
                    }
                }
            }
        }
    }
}

/// Writes the page for a view-tree to `output_path`.
///
/// # Errors / 错误
/// Returns an error if the file cannot be written.
/// 如果无法写入文件，则返回错误。
pub fn generate_html_view(
    nodes: &[Node],
    query: &str,
    source: &SourceStatus,
    panel_width: i64,
    output_path: &Path,
    locale: &str,
) -> Result<()> {
    let page = render_html_view(nodes, query, source, panel_width, locale);
    fs::write(output_path, page.into_string())
        .with_context(|| format!("Failed to write HTML view to {}", output_path.display()))?;
    Ok(())
}
