//! # Core Module / 核心模块
//!
//! This module contains the core functionality of Catalog Viewer:
//! the node model, tree lookups, the filter/highlight engine, the import
//! adapter, the playlist sequencer and the application state that ties them together.
//!
//! 此模块包含 Catalog Viewer 的核心功能：
//! 节点模型、树查找、过滤/高亮引擎、导入适配器、播放列表序列器以及将它们联系在一起的应用状态。

pub mod filter;
pub mod import;
pub mod models;
pub mod playlist;
pub mod state;
pub mod tree;

// Re-exports
pub use models::Node;
pub use state::AppState;
pub use tree::Catalog;
