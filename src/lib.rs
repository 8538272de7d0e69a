//! # Catalog Viewer Library / Catalog Viewer 库
//!
//! This library provides the core functionality for the Catalog Viewer tool,
//! a browser for hierarchical test catalogs with search, playlists and
//! Xray/Jira export import.
//!
//! 此库为 Catalog Viewer 工具提供核心功能，
//! 这是一个支持搜索、播放列表和 Xray/Jira 导出导入的分层测试目录浏览器。
//!
//! ## Modules / 模块
//!
//! - `core` - Tree model, filtering, import mapping, playlist sequencing and application state
//! - `infra` - Infrastructure services like configuration, data sources, preferences and timers
//! - `reporting` - Console and HTML rendering of the catalog
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 树模型、过滤、导入映射、播放列表序列和应用状态
//! - `infra` - 基础设施服务，如配置、数据源、偏好设置和定时器
//! - `reporting` - 目录的控制台和 HTML 渲染
//! - `cli` - 命令行接口和命令

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::filter;
pub use crate::core::models;
pub use crate::core::playlist;
pub use crate::core::state;
pub use crate::core::tree;

/// Picks the user interface language from an explicit request or the system locale.
///
/// It attempts to match the full locale (e.g., "pl-PL"), then just the language
/// code (e.g., "pl"), and finally falls back to the default language ("en").
pub fn resolve_locale(requested: Option<&str>) -> String {
    let locale = requested
        .map(str::to_string)
        .or_else(sys_locale::get_locale)
        .unwrap_or_else(|| "en".to_string());
    let available_locales = rust_i18n::available_locales!();

    if available_locales.contains(&locale.as_str()) {
        return locale;
    }
    locale
        .split(['-', '_'])
        .next()
        .filter(|lang_code| available_locales.contains(lang_code))
        .unwrap_or("en")
        .to_string()
}

/// Initializes the application's internationalization (i18n) and returns the active locale.
pub fn init(requested: Option<&str>) -> String {
    let lang = resolve_locale(requested);
    rust_i18n::set_locale(&lang);
    lang
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
