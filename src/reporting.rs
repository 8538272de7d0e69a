//! # Reporting Module / 报告模块
//!
//! This module renders the catalog for people: colored console trees and
//! details panels with internationalization support, and a self-contained
//! static HTML page of the view-tree.
//!
//! 此模块为用户渲染目录：支持国际化的彩色控制台树和详情面板，
//! 以及视图树的独立静态 HTML 页面。

pub mod console;
pub mod html;

// Re-export common reporting functions
pub use console::{print_details, print_playlist_status, print_source_status, print_tree};
pub use html::generate_html_view;
