//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures used throughout the viewer:
//! the catalog `Node` (a suite or a test), its display kind, and the
//! details-panel projection of a selected node.
//!
//! 此模块定义了整个查看器中使用的核心数据结构：
//! 目录节点 `Node`（套件或测试）、其显示类型以及所选节点的详情面板投影。

use serde::{Deserialize, Serialize};

/// Id prefix that marks a node as a suite in the details panel.
pub const SUITE_ID_PREFIX: &str = "suite-";

/// A single entry of the catalog tree.
/// A node with a non-empty `children` list is a suite; anything else is a test.
///
/// 目录树中的单个条目。
/// 拥有非空 `children` 列表的节点是套件；其他都是测试。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Identifier, assumed unique within the forest / 标识符，假定在森林中唯一
    pub id: String,
    /// Human-readable label / 可读名称
    pub name: String,
    /// Optional free-form description / 可选描述
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered child nodes / 有序子节点
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node>>,
}

impl Node {
    /// Creates a leaf node without a description.
    pub fn leaf(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            children: None,
        }
    }

    /// Creates a suite node holding `children`.
    pub fn suite(id: impl Into<String>, name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            children: Some(children),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Child nodes, or an empty slice for leaves.
    /// 子节点；叶子节点返回空切片。
    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// `true` when the node has at least one child. An empty `children` list
    /// counts as a leaf.
    pub fn is_suite(&self) -> bool {
        !self.children().is_empty()
    }

    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// The details section this node is shown under.
    pub fn kind(&self) -> NodeKind {
        if self.id.starts_with(SUITE_ID_PREFIX) {
            NodeKind::Suite
        } else {
            NodeKind::Test
        }
    }

    /// Pretty-printed JSON of the node, as shown in the raw section of the details panel.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Which details section a node belongs to. Derived from the id naming
/// convention, not from the tree structure.
///
/// 节点所属的详情分区。由 id 命名约定推导，而非树结构。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    Suite,
    Test,
}

/// Everything the details panel displays for a selected node.
///
/// 详情面板为所选节点显示的全部内容。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeDetails {
    pub id: String,
    pub name: String,
    /// `None` when the node has no description or an empty one.
    pub description: Option<String>,
    /// Number of leaf tests under the node (1 for a leaf).
    pub leaf_count: usize,
    pub kind: NodeKind,
    pub raw_json: String,
    /// Ids from the root down to the node itself.
    pub path: Vec<String>,
}

impl NodeDetails {
    pub fn new(node: &Node, path: Vec<String>) -> Self {
        Self {
            id: node.id.clone(),
            name: node.name.clone(),
            description: node.description.clone().filter(|d| !d.is_empty()),
            leaf_count: crate::core::tree::count_leaves(node),
            kind: node.kind(),
            raw_json: node.to_pretty_json(),
            path,
        }
    }
}

/// The built-in catalog used when no export has been loaded.
///
/// 未加载任何导出时使用的内置目录。
pub fn seed_catalog() -> Vec<Node> {
    vec![
        Node::suite(
            "suite-a",
            "Suite A",
            vec![
                Node::leaf("a-1", "Test A1").with_description("Checks login"),
                Node::leaf("a-2", "Test A2").with_description("Checks logout"),
            ],
        )
        .with_description("Root suite A"),
        Node::suite(
            "suite-b",
            "Suite B",
            vec![Node::suite(
                "b-1",
                "Nested Suite",
                vec![Node::leaf("b-1-1", "Deep Test").with_description("Deep test")],
            )],
        ),
    ]
}
