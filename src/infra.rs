//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for Catalog Viewer,
//! including configuration loading, export sources, persisted preferences,
//! the playlist timer and i18n support.
//!
//! 此模块为 Catalog Viewer 提供基础设施服务，
//! 包括配置加载、导出数据源、持久化偏好设置、播放列表定时器和国际化支持。

pub mod config;
pub mod prefs;
pub mod source;
pub mod ticker;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
