//! # Import Adapter Unit Tests / 导入适配单元测试
//!
//! Field-priority mapping, record extraction, local ingestion and the two-tier
//! remote discovery against an in-memory source.
//!
//! 字段优先级映射、记录提取、本地摄取以及针对内存数据源的两级远程发现。

mod common;

use catalog_viewer::core::import::{
    FIELD_TABLE, ImportError, UNNAMED, extract_records, fetch_remote, ingest_local_text, is_present,
    map_record,
};
use common::MemorySource;
use serde_json::json;

#[cfg(test)]
mod map_record_tests {
    use super::*;

    #[test]
    fn test_field_table_order() {
        let targets: Vec<&str> = FIELD_TABLE.iter().map(|field| field.target).collect();
        assert_eq!(targets, ["id", "name", "description", "children"]);
    }

    #[test]
    fn test_key_and_summary_win() {
        let node = map_record(&json!({
            "id": "internal-7",
            "key": "X-1",
            "name": "fallback",
            "summary": "Foo"
        }));
        assert_eq!(node.id, "X-1");
        assert_eq!(node.name, "Foo");
        assert_eq!(node.description.as_deref(), Some(""));
        assert!(node.children.is_none());
    }

    #[test]
    fn test_falsy_candidates_are_skipped() {
        let node = map_record(&json!({ "key": "", "id": 0, "testKey": "T-9", "title": "Titled" }));
        assert_eq!(node.id, "T-9");
        assert_eq!(node.name, "Titled");
    }

    #[test]
    fn test_numeric_id_is_rendered_as_text() {
        let node = map_record(&json!({ "id": 42 }));
        assert_eq!(node.id, "42");
        assert_eq!(node.name, "42");
    }

    #[test]
    fn test_name_falls_back_to_unnamed() {
        let node = map_record(&json!({ "details": "only details" }));
        assert_eq!(node.id, "");
        assert_eq!(node.name, UNNAMED);
        assert_eq!(node.description.as_deref(), Some("only details"));
    }

    #[test]
    fn test_nested_fields_description() {
        let node = map_record(&json!({ "key": "X-2", "fields": { "description": "from jira" } }));
        assert_eq!(node.description.as_deref(), Some("from jira"));
    }

    #[test]
    fn test_children_are_mapped_recursively() {
        let node = map_record(&json!({
            "key": "S-1",
            "items": [{ "key": "C-1" }, { "issueKey": "C-2", "summary": "Second" }]
        }));
        let children = node.children.unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].id, "C-1");
        assert_eq!(children[1].name, "Second");
    }

    #[test]
    fn test_non_array_or_empty_children_are_omitted() {
        assert!(map_record(&json!({ "key": "a", "tests": "nope" })).children.is_none());
        assert!(map_record(&json!({ "key": "a", "tests": [] })).children.is_none());
    }

    #[test]
    fn test_non_object_record_is_unnamed() {
        let node = map_record(&json!("just a string"));
        assert_eq!(node.name, UNNAMED);
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_present(&json!(null)));
        assert!(!is_present(&json!(false)));
        assert!(!is_present(&json!(0)));
        assert!(!is_present(&json!("")));
        assert!(is_present(&json!([])));
        assert!(is_present(&json!({})));
        assert!(is_present(&json!(-1.5)));
    }
}

#[cfg(test)]
mod ingest_tests {
    use super::*;

    #[test]
    fn test_extract_records_shapes() {
        assert_eq!(extract_records(json!([1, 2])).len(), 2);
        assert_eq!(extract_records(json!({ "tests": [1, 2, 3] })).len(), 3);
        assert_eq!(extract_records(json!({ "issues": [1] })).len(), 1);
        assert_eq!(extract_records(json!({ "tests": "x", "key": "K" })).len(), 1);
        assert_eq!(extract_records(json!({ "key": "K" }))[0], json!({ "key": "K" }));
    }

    #[test]
    fn test_ingest_issues_export() {
        let nodes = ingest_local_text(r#"{"issues":[{"key":"J-1","summary":"Jira"}]}"#).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].id, "J-1");
    }

    #[test]
    fn test_ingest_malformed_text_is_parse_error() {
        let err = ingest_local_text("not json").unwrap_err();
        assert!(matches!(err, ImportError::Parse(_)));
    }

    #[test]
    fn test_ingest_null_document_is_rejected() {
        assert!(matches!(ingest_local_text("null"), Err(ImportError::Null)));
    }
}

#[cfg(test)]
mod remote_tests {
    use super::*;

    #[tokio::test]
    async fn test_index_with_failing_file() {
        let source = MemorySource::new()
            .with("index.json", json!(["f1.json", "f2.json"]))
            .with("f1.json", json!({ "tests": [{ "key": "X-1", "summary": "Foo" }] }));

        let nodes = fetch_remote(&source).await.unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].id, "X-1");
        assert_eq!(nodes[0].name, "Foo");
    }

    #[tokio::test]
    async fn test_index_contributions_keep_file_order() {
        let source = MemorySource::new()
            .with("index.json", json!(["a.json", 7, "b.json", "c.json"]))
            .with("a.json", json!([{ "key": "A-1" }, { "key": "A-2" }]))
            .with("b.json", json!({ "key": "B-1" }))
            .with("c.json", json!({ "tests": "not an array", "key": "C-1" }));

        let ids: Vec<String> = fetch_remote(&source)
            .await
            .unwrap()
            .into_iter()
            .map(|node| node.id)
            .collect();
        // A non-array `tests` field contributes nothing.
        assert_eq!(ids, ["A-1", "A-2", "B-1"]);
    }

    #[tokio::test]
    async fn test_falls_back_to_tests_json() {
        let source = MemorySource::new()
            .with("index.json", json!(["missing.json"]))
            .with("tests.json", json!({ "tests": [{ "key": "T-1" }] }));

        let nodes = fetch_remote(&source).await.unwrap();
        assert_eq!(nodes[0].id, "T-1");
    }

    #[tokio::test]
    async fn test_nothing_found_is_none() {
        assert!(fetch_remote(&MemorySource::new()).await.is_none());
        let only_null = MemorySource::new().with("tests.json", json!(null));
        assert!(fetch_remote(&only_null).await.is_none());
    }
}
