//! # Tree Model Module / 树模型模块
//!
//! Holds the ordered forest of catalog nodes and answers lookups against it.
//! Resolution of an external token degrades through three strategies of
//! increasing looseness: exact id, flexible id (contains / "file:line"
//! suffixes), then name substring. When ids are duplicated the first node in
//! pre-order wins.
//!
//! 保存有序的目录节点森林并响应查找。
//! 外部标记的解析按宽松程度递增依次尝试三种策略：精确 id、灵活 id（包含/"文件:行号"后缀），
//! 最后是名称子串。当 id 重复时，前序遍历中的第一个节点胜出。

use crate::core::models::{Node, seed_catalog};

/// The ordered forest of catalog nodes.
/// 有序的目录节点森林。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    nodes: Vec<Node>,
}

impl Catalog {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// The built-in catalog.
    pub fn seed() -> Self {
        Self::new(seed_catalog())
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of root nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Substitutes the whole forest, returning the previous one.
    pub fn replace(&mut self, nodes: Vec<Node>) -> Vec<Node> {
        std::mem::replace(&mut self.nodes, nodes)
    }

    /// Pre-order, depth-first iteration over every node of the forest.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder::new(&self.nodes)
    }

    /// Total number of leaf tests in the forest.
    pub fn total_leaves(&self) -> usize {
        self.nodes.iter().map(count_leaves).sum()
    }

    /// Returns the first node, in pre-order, whose id equals `id`.
    pub fn find_exact(&self, id: &str) -> Option<&Node> {
        self.iter().find(|node| node.id == id)
    }

    /// Two-pass lookup: flexible id matching over the whole forest, then a
    /// case-insensitive name substring match.
    ///
    /// 两遍查找：先在整个森林中进行灵活的 id 匹配，然后进行不区分大小写的名称子串匹配。
    pub fn find_flexible(&self, token: &str) -> Option<&Node> {
        if let Some(node) = self.iter().find(|node| token_matches_id(token, &node.id)) {
            return Some(node);
        }
        let needle = token.to_lowercase();
        self.iter()
            .find(|node| node.name.to_lowercase().contains(&needle))
    }

    /// Exact lookup first, then the flexible strategies. An empty token never resolves.
    pub fn resolve(&self, token: &str) -> Option<&Node> {
        if token.is_empty() {
            return None;
        }
        self.find_exact(token).or_else(|| self.find_flexible(token))
    }

    /// The chain of nodes from a root down to (and including) the node with `id`.
    /// Used to expand every ancestor of a selection.
    ///
    /// 从根节点到 `id` 对应节点（含）的节点链。用于展开所选节点的所有祖先。
    pub fn path_to(&self, id: &str) -> Option<Vec<&Node>> {
        let mut path = Vec::new();
        if collect_path(&self.nodes, id, &mut path) {
            Some(path)
        } else {
            None
        }
    }
}

impl From<Vec<Node>> for Catalog {
    fn from(nodes: Vec<Node>) -> Self {
        Self::new(nodes)
    }
}

/// Counts leaf tests under `node`. A node without children counts as one.
/// 统计 `node` 下的叶子测试数量。没有子节点的节点计为一个。
pub fn count_leaves(node: &Node) -> usize {
    if !node.is_suite() {
        return 1;
    }
    node.children().iter().map(count_leaves).sum()
}

/// Flexible id match used by the first pass of `Catalog::find_flexible`.
///
/// Tokens containing a colon look like runner locations ("file.spec.ts:12")
/// and match ids that end with or contain them, case-sensitively. Other tokens
/// match any id that contains them, ignoring case.
pub fn token_matches_id(token: &str, id: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    if id == token {
        return true;
    }
    if token.contains(':') {
        id.ends_with(token) || id.contains(token)
    } else {
        id.to_lowercase().contains(&token.to_lowercase())
    }
}

fn collect_path<'a>(nodes: &'a [Node], id: &str, path: &mut Vec<&'a Node>) -> bool {
    for node in nodes {
        path.push(node);
        if node.id == id || collect_path(node.children(), id, path) {
            return true;
        }
        path.pop();
    }
    false
}

/// Pre-order iterator over a forest, see [`Catalog::iter`].
pub struct PreOrder<'a> {
    stack: Vec<std::slice::Iter<'a, Node>>,
}

impl<'a> PreOrder<'a> {
    pub fn new(nodes: &'a [Node]) -> Self {
        Self {
            stack: vec![nodes.iter()],
        }
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(node) => {
                    self.stack.push(node.children().iter());
                    return Some(node);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
