//! # Console Reporting Module / 控制台报告模块
//!
//! This module renders the view-tree, the details panel and the status lines
//! to the console. It provides colorful, formatted output with
//! internationalization support.
//!
//! 此模块在控制台中渲染视图树、详情面板和状态行。
//! 它提供支持国际化的彩色格式化输出。

use colored::*;

use crate::core::filter::match_ranges;
use crate::core::models::{Node, NodeDetails, NodeKind};
use crate::core::playlist::PlaylistStatus;
use crate::core::state::SourceStatus;
use crate::core::tree::count_leaves;
use crate::infra::t;

/// Renders a forest as an indented tree, highlighting `query` in node names.
///
/// 将森林渲染为缩进树，并在节点名称中高亮 `query`。
///
/// # Output Format / 输出格式
/// ```text
/// ▾ Suite A  suite-a  [2]
/// ├── • Test A1  a-1
/// └── • Test A2  a-2
/// ```
pub fn render_tree(nodes: &[Node], query: &str, locale: &str) -> String {
    if nodes.is_empty() {
        return format!("{}\n", t!("tree.no_results", locale = locale).dimmed());
    }
    let mut out = String::new();
    for node in nodes {
        render_node(&mut out, node, query, "", None);
    }
    out
}

fn render_node(out: &mut String, node: &Node, query: &str, indent: &str, is_last: Option<bool>) {
    let branch = match is_last {
        None => "",
        Some(true) => "└── ",
        Some(false) => "├── ",
    };
    let marker = if node.is_suite() { "▾" } else { "•" };
    let mut line = format!(
        "{indent}{branch}{} {}  {}",
        marker.cyan(),
        highlight_console(&node.name, query),
        node.id.dimmed()
    );
    if node.is_suite() {
        line.push_str(&format!("  {}", format!("[{}]", count_leaves(node)).dimmed()));
    }
    out.push_str(&line);
    out.push('\n');

    let child_indent = match is_last {
        None => indent.to_string(),
        Some(true) => format!("{indent}    "),
        Some(false) => format!("{indent}│   "),
    };
    let children = node.children();
    for (i, child) in children.iter().enumerate() {
        render_node(out, child, query, &child_indent, Some(i + 1 == children.len()));
    }
}

/// Colors every case-insensitive occurrence of `query` in `text`.
pub fn highlight_console(text: &str, query: &str) -> String {
    let mut out = String::new();
    let mut last = 0;
    for range in match_ranges(text, query) {
        out.push_str(&text[last..range.start]);
        out.push_str(&text[range.clone()].black().on_yellow().to_string());
        last = range.end;
    }
    out.push_str(&text[last..]);
    out
}

/// Prints the view-tree to stdout.
pub fn print_tree(nodes: &[Node], query: &str, locale: &str) {
    print!("{}", render_tree(nodes, query, locale));
}

/// Renders the details panel of a selected node.
///
/// 渲染所选节点的详情面板。
pub fn render_details(details: &NodeDetails, locale: &str) -> String {
    let section = match details.kind {
        NodeKind::Suite => t!("details.section_suite", locale = locale),
        NodeKind::Test => t!("details.section_test", locale = locale),
    };
    let description = details
        .description
        .clone()
        .unwrap_or_else(|| t!("details.no_description", locale = locale).to_string());

    let mut out = String::new();
    out.push_str(&format!("{}\n", format!("--- {section} ---").bold()));
    out.push_str(&format!(
        "  {:<14} {}\n",
        t!("details.id", locale = locale),
        details.id.cyan()
    ));
    out.push_str(&format!(
        "  {:<14} {}\n",
        t!("details.name", locale = locale),
        details.name
    ));
    out.push_str(&format!(
        "  {:<14} {}\n",
        t!("details.description", locale = locale),
        description
    ));
    out.push_str(&format!(
        "  {:<14} {}\n",
        t!("details.length", locale = locale),
        details.leaf_count
    ));
    if details.path.len() > 1 {
        out.push_str(&format!(
            "  {:<14} {}\n",
            t!("details.path", locale = locale),
            details.path.join(" › ").dimmed()
        ));
    }
    out.push_str(&format!("\n{}\n", t!("details.raw_json", locale = locale).yellow()));
    out.push_str(&details.raw_json);
    out.push('\n');
    out
}

/// Prints the details panel to stdout.
pub fn print_details(details: &NodeDetails, locale: &str) {
    print!("{}", render_details(details, locale));
}

/// The localized text of a source status line.
pub fn source_status_text(status: &SourceStatus, locale: &str) -> String {
    match status {
        SourceStatus::Seed => t!("source.seed", locale = locale).to_string(),
        SourceStatus::LocalFile(path) => t!("source.local_file", locale = locale, path = path).to_string(),
        SourceStatus::Remote(location) => {
            t!("source.remote", locale = locale, location = location).to_string()
        }
        SourceStatus::RemoteEmpty(location) => {
            t!("source.remote_empty", locale = locale, location = location).to_string()
        }
        SourceStatus::ParseError(path) => t!("source.parse_error", locale = locale, path = path).to_string(),
        SourceStatus::ReadError(path) => t!("source.read_error", locale = locale, path = path).to_string(),
    }
}

/// Prints the source status line; failed loads go to stderr in red.
pub fn print_source_status(status: &SourceStatus, locale: &str) {
    let text = source_status_text(status, locale);
    if status.is_error() {
        eprintln!("{}", text.red());
    } else {
        println!("{}", text.cyan());
    }
}

/// Prints the "current/total" playlist position.
pub fn print_playlist_status(status: PlaylistStatus, locale: &str) {
    println!(
        "{}",
        t!("playlist.position", locale = locale, position = status).bold()
    );
}
