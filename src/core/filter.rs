//! # Filter/Highlight Module / 过滤与高亮模块
//!
//! Derives the view-tree shown for a search query: a pruned copy of the forest
//! that keeps matching nodes and their ancestors, plus HTML-safe highlighting
//! of the query inside labels.
//!
//! 根据搜索查询派生视图树：保留匹配节点及其祖先的森林剪枝副本，
//! 以及在标签内对查询进行 HTML 安全的高亮。

use std::borrow::Cow;
use std::ops::Range;

use crate::core::models::Node;

/// Opening and closing emphasis markers inserted around matches.
pub const MARK_OPEN: &str = "<mark>";
pub const MARK_CLOSE: &str = "</mark>";

/// Returns `true` when `query` is empty or occurs, ignoring case, in the
/// node's id, name or description.
///
/// 当 `query` 为空，或（忽略大小写）出现在节点的 id、名称或描述中时返回 `true`。
pub fn matches(node: &Node, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    matches_lowered(node, &query.to_lowercase())
}

fn matches_lowered(node: &Node, lowered_query: &str) -> bool {
    let haystack = format!(
        "{} {} {}",
        node.id,
        node.name,
        node.description_text()
    )
    .to_lowercase();
    haystack.contains(lowered_query)
}

/// Builds the view-tree for `query`.
///
/// A node is kept when it matches or when at least one of its filtered
/// descendants survives. Kept nodes carry only id, name, description and the
/// filtered children (omitted when none survive). An empty query or an empty
/// forest returns the input itself.
///
/// 为 `query` 构建视图树。
/// 节点在自身匹配或至少有一个过滤后的后代保留时被保留。
/// 空查询或空森林直接返回输入本身。
pub fn filter<'a>(nodes: &'a [Node], query: &str) -> Cow<'a, [Node]> {
    if query.is_empty() || nodes.is_empty() {
        return Cow::Borrowed(nodes);
    }
    Cow::Owned(filter_lowered(nodes, &query.to_lowercase()))
}

fn filter_lowered(nodes: &[Node], lowered_query: &str) -> Vec<Node> {
    let mut out = Vec::new();
    for node in nodes {
        let children = filter_lowered(node.children(), lowered_query);
        if matches_lowered(node, lowered_query) || !children.is_empty() {
            out.push(Node {
                id: node.id.clone(),
                name: node.name.clone(),
                description: node.description.clone(),
                children: if children.is_empty() {
                    None
                } else {
                    Some(children)
                },
            });
        }
    }
    out
}

/// Escapes the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Inverse of [`escape_html`].
pub fn unescape_html(input: &str) -> String {
    input
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Escapes `text` and wraps every case-insensitive literal occurrence of
/// `query` found in the escaped string in `<mark>` markers.
///
/// Matching runs on the escaped text, so a query can land inside an entity
/// (e.g. `amp`); stripping the markers and unescaping still yields `text`.
///
/// 转义 `text`，并将在转义字符串中找到的每个（不区分大小写的）`query` 字面出现用 `<mark>` 包裹。
pub fn highlight(text: &str, query: &str) -> String {
    let escaped = escape_html(text);
    if query.is_empty() {
        return escaped;
    }

    let mut out = String::with_capacity(escaped.len() + MARK_OPEN.len() + MARK_CLOSE.len());
    let mut last = 0;
    for range in match_ranges(&escaped, query) {
        out.push_str(&escaped[last..range.start]);
        out.push_str(MARK_OPEN);
        out.push_str(&escaped[range.clone()]);
        out.push_str(MARK_CLOSE);
        last = range.end;
    }
    out.push_str(&escaped[last..]);
    out
}

/// Byte ranges of the non-overlapping, case-insensitive occurrences of
/// `needle` in `haystack`, scanned left to right. Empty needles match nothing.
///
/// `needle` 在 `haystack` 中（不区分大小写、互不重叠）出现位置的字节范围，从左到右扫描。
pub fn match_ranges(haystack: &str, needle: &str) -> Vec<Range<usize>> {
    let needle: Vec<char> = needle.chars().collect();
    let mut ranges = Vec::new();
    if needle.is_empty() {
        return ranges;
    }

    let mut pos = 0;
    while pos < haystack.len() {
        let rest = &haystack[pos..];
        match match_len_at(rest, &needle) {
            Some(len) => {
                ranges.push(pos..pos + len);
                pos += len;
            }
            None => {
                pos += rest.chars().next().map_or(1, char::len_utf8);
            }
        }
    }
    ranges
}

fn match_len_at(s: &str, needle: &[char]) -> Option<usize> {
    let mut chars = s.char_indices();
    for &expected in needle {
        let (_, c) = chars.next()?;
        if !chars_eq_ignore_case(c, expected) {
            return None;
        }
    }
    Some(chars.next().map_or(s.len(), |(idx, _)| idx))
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
