//! # Export Source Integration Tests / 导出数据源集成测试
//!
//! Remote discovery and local-file ingestion against real files on disk.
//!
//! 针对磁盘上真实文件的远程发现和本地文件摄取。

mod common;

use catalog_viewer::core::import::{ImportError, XraySource, fetch_remote};
use catalog_viewer::infra::source::{DirSource, HttpSource, ingest_local_file};
use catalog_viewer::state::{AppState, SourceStatus};
use std::time::Duration;

#[tokio::test]
async fn test_dir_source_index_with_missing_file() {
    let dir = common::export_dir(&[
        ("index.json", r#"["f1.json", "f2.json"]"#),
        ("f1.json", r#"{"tests":[{"key":"X-1","summary":"Foo"}]}"#),
    ]);
    let source = DirSource::new(dir.path());

    let nodes = fetch_remote(&source).await.unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].id, "X-1");
    assert_eq!(nodes[0].name, "Foo");
}

#[tokio::test]
async fn test_dir_source_undecodable_file_is_absent() {
    let dir = common::export_dir(&[("index.json", "[oops"), ("tests.json", r#"[{"id":"T-1"}]"#)]);
    let source = DirSource::new(dir.path());

    assert!(source.fetch_json("index.json").await.is_none());
    let nodes = fetch_remote(&source).await.unwrap();
    assert_eq!(nodes[0].id, "T-1");
}

#[tokio::test]
async fn test_dir_source_import_through_state() {
    let dir = common::export_dir(&[(
        "tests.json",
        r#"{"tests":[{"key":"S-1","summary":"Suite","children":[{"key":"C-1"}]}]}"#,
    )]);
    let source = DirSource::new(dir.path());
    let mut state = AppState::default();

    assert!(state.import_remote(&source).await);
    assert_eq!(
        state.source_status(),
        &SourceStatus::Remote(dir.path().display().to_string())
    );
    assert!(state.select("C-1"));
    assert_eq!(state.selection_details().unwrap().path, ["S-1", "C-1"]);
}

#[tokio::test]
async fn test_ingest_local_file() {
    let dir = common::export_dir(&[("export.json", r#"[{"key":"L-1","summary":"Local"}]"#)]);
    let nodes = ingest_local_file(&dir.path().join("export.json")).await.unwrap();
    assert_eq!(nodes[0].name, "Local");
}

#[tokio::test]
async fn test_ingest_missing_local_file_is_read_error() {
    let dir = common::export_dir(&[]);
    let err = ingest_local_file(&dir.path().join("missing.json")).await.unwrap_err();
    assert!(matches!(err, ImportError::Read { .. }));
}

#[tokio::test]
async fn test_unreachable_http_source_is_absent() {
    // Port 9 (discard) on localhost is not expected to serve HTTP.
    let source = HttpSource::new("http://127.0.0.1:9/xray", Duration::from_secs(2)).unwrap();
    assert_eq!(source.describe(), "http://127.0.0.1:9/xray/");
    assert!(fetch_remote(&source).await.is_none());
}

#[tokio::test]
async fn test_dir_source_ignores_names_outside_root() {
    let outside = common::export_dir(&[("secret.json", r#"[{"key":"OUT-1"}]"#)]);
    let secret = outside.path().join("secret.json");
    let index = serde_json::json!([secret.display().to_string(), "../secret.json", "ok.json"]).to_string();
    let dir = common::export_dir(&[
        ("index.json", index.as_str()),
        ("ok.json", r#"[{"key":"IN-1"}]"#),
    ]);
    let source = DirSource::new(dir.path());

    assert!(source.file_path("../secret.json").is_err());
    assert!(source.file_path(&secret.display().to_string()).is_err());
    assert!(source.file_path("").is_err());
    assert_eq!(source.file_path("./ok.json").unwrap(), dir.path().join("./ok.json"));

    let ids: Vec<String> = fetch_remote(&source)
        .await
        .unwrap()
        .into_iter()
        .map(|node| node.id)
        .collect();
    assert_eq!(ids, ["IN-1"]);
}

#[test]
fn test_http_file_urls_stay_under_base() {
    let source = HttpSource::new("http://host/xray", Duration::from_secs(1)).unwrap();
    assert_eq!(source.file_url("f1.json").unwrap().as_str(), "http://host/xray/f1.json");
    assert_eq!(source.file_url("/f.json").unwrap().as_str(), "http://host/xray/%2Ff.json");

    let foreign = source.file_url("http://evil/x.json").unwrap();
    assert_eq!(foreign.host_str(), Some("host"));
    assert!(foreign.path().starts_with("/xray/"));
    assert_eq!(foreign.path_segments().unwrap().count(), 2);
}

#[test]
fn test_http_source_rejects_invalid_url() {
    assert!(HttpSource::new("not a url", Duration::from_secs(1)).is_err());
}
