//! # Config Module Unit Tests / Config 模块单元测试
//!
//! Defaults, partial documents and error reporting of `CatalogViewer.toml`.
//!
//! `CatalogViewer.toml` 的默认值、部分文档和错误报告。

use catalog_viewer::infra::config::{ViewerConfig, load, parse};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::tempdir;

#[cfg(test)]
mod parse_tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = parse("").unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.language, "en");
        assert_eq!(config.playlist.interval(), Duration::from_millis(3000));
        assert_eq!(config.playlist.max_skips_per_tick, 64);
        assert_eq!(config.source.base_url, "http://localhost:8080/xray/");
        assert_eq!(config.source.timeout_secs, 10);
        assert_eq!(config.prefs.path, PathBuf::from(".catalog-viewer/prefs.json"));
    }

    #[test]
    fn test_partial_tables_keep_other_defaults() {
        let config = parse(
            r#"
            language = "pl"

            [playlist]
            interval_ms = 500

            [source]
            dir = "exports"
            "#,
        )
        .unwrap();
        assert_eq!(config.language, "pl");
        assert_eq!(config.playlist.interval_ms, 500);
        assert_eq!(config.playlist.max_skips_per_tick, 64);
        assert_eq!(config.source.dir, Some(PathBuf::from("exports")));
        assert_eq!(config.source.timeout_secs, 10);
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let err = parse("[playlist]\ninterval_ms = 0").unwrap_err();
        assert!(err.to_string().contains("interval_ms"));
        assert_eq!(parse("[playlist]\ninterval_ms = 1").unwrap().playlist.interval_ms, 1);
    }

    #[test]
    fn test_wrong_type_is_error() {
        assert!(parse("[playlist]\ninterval_ms = \"fast\"").is_err());
    }

    #[test]
    fn test_default_serializes_and_parses_back() {
        let text = toml::to_string_pretty(&ViewerConfig::default()).unwrap();
        assert!(text.contains("[playlist]"));
        assert!(!text.contains("dir ="));
        assert_eq!(parse(&text).unwrap(), ViewerConfig::default());
    }
}

#[cfg(test)]
mod load_tests {
    use super::*;

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = load(Some(path.as_path()), "en").unwrap_err();
        assert!(format!("{err:#}").contains("absent.toml"));
    }

    #[test]
    fn test_malformed_file_error_has_context() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[playlist\ninterval_ms = 1").unwrap();
        let err = load(Some(path.as_path()), "en").unwrap_err();
        assert!(err.to_string().contains("Failed to parse configuration file"));
    }

    #[test]
    fn test_explicit_file_is_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("viewer.toml");
        fs::write(&path, "[source]\ntimeout_secs = 3").unwrap();
        let config = load(Some(path.as_path()), "en").unwrap();
        assert_eq!(config.source.timeout_secs, 3);
    }
}
