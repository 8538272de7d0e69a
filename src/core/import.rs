//! # Import Adapter Module / 导入适配模块
//!
//! Normalizes loosely structured Xray/Jira export records into catalog nodes.
//! Every target attribute has an ordered list of candidate source fields; the
//! first candidate holding a "present" (truthy) value wins. The mapping is
//! best-effort and lossy: unknown fields are dropped.
//!
//! 将结构松散的 Xray/Jira 导出记录规范化为目录节点。
//! 每个目标属性都有一个有序的候选源字段列表；第一个持有“存在”（真值）的候选字段胜出。
//! 映射是尽力而为且有损的：未知字段会被丢弃。

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::core::models::Node;

/// Name of the index listing fetched first during remote discovery.
pub const INDEX_FILE: &str = "index.json";
/// Single-file fallback fetched when the index yields nothing.
pub const FALLBACK_FILE: &str = "tests.json";
/// Name used when a record carries neither a name nor an id.
pub const UNNAMED: &str = "unnamed";

/// Ordered candidate source fields for one target attribute, highest priority first.
/// Each candidate is a path of object keys.
///
/// 一个目标属性的有序候选源字段，优先级从高到低。每个候选项是对象键的路径。
#[derive(Debug, Clone, Copy)]
pub struct FieldPriority {
    pub target: &'static str,
    pub sources: &'static [&'static [&'static str]],
}

impl FieldPriority {
    /// The value of the first candidate that is present in `record`.
    pub fn first_present<'v>(&self, record: &'v Value) -> Option<&'v Value> {
        self.sources
            .iter()
            .filter_map(|path| lookup(record, path))
            .find(|value| is_present(value))
    }
}

pub const ID_FIELDS: FieldPriority = FieldPriority {
    target: "id",
    sources: &[&["key"], &["id"], &["testKey"], &["issueKey"]],
};

pub const NAME_FIELDS: FieldPriority = FieldPriority {
    target: "name",
    sources: &[&["summary"], &["name"], &["title"]],
};

pub const DESCRIPTION_FIELDS: FieldPriority = FieldPriority {
    target: "description",
    sources: &[&["description"], &["fields", "description"], &["details"]],
};

pub const CHILDREN_FIELDS: FieldPriority = FieldPriority {
    target: "children",
    sources: &[&["tests"], &["children"], &["items"], &["nodes"]],
};

/// The complete mapping table, in attribute order.
pub const FIELD_TABLE: [FieldPriority; 4] =
    [ID_FIELDS, NAME_FIELDS, DESCRIPTION_FIELDS, CHILDREN_FIELDS];

/// Errors raised while ingesting a locally supplied export.
/// 摄取本地导出时引发的错误。
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to parse export: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read export file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("export document is null")]
    Null,
}

/// A place exports can be fetched from by file name (an HTTP directory, a
/// local folder, ...). Every failure is reported as `None`.
///
/// 可以按文件名获取导出的位置（HTTP 目录、本地文件夹等）。所有失败都报告为 `None`。
#[async_trait]
pub trait XraySource: Send + Sync {
    /// Short human-readable location, used in status messages.
    fn describe(&self) -> String;

    /// Fetches and decodes the JSON resource `name`, or `None` on any
    /// transport or decode failure.
    async fn fetch_json(&self, name: &str) -> Option<Value>;
}

/// Maps one loosely typed export record to a node through [`FIELD_TABLE`].
///
/// 通过 [`FIELD_TABLE`] 将一条松散类型的导出记录映射为节点。
pub fn map_record(record: &Value) -> Node {
    let id = ID_FIELDS
        .first_present(record)
        .map(value_text)
        .unwrap_or_default();

    let name = NAME_FIELDS
        .first_present(record)
        .map(value_text)
        .or_else(|| (!id.is_empty()).then(|| id.clone()))
        .unwrap_or_else(|| UNNAMED.to_string());

    let description = DESCRIPTION_FIELDS
        .first_present(record)
        .map(value_text)
        .unwrap_or_default();

    let children = CHILDREN_FIELDS
        .first_present(record)
        .and_then(Value::as_array)
        .filter(|items| !items.is_empty())
        .map(|items| items.iter().map(map_record).collect());

    Node {
        id,
        name,
        description: Some(description),
        children,
    }
}

/// Splits an export document into records: an array yields its elements, an
/// object with a `tests` or `issues` array yields that array, anything else is
/// a single record.
///
/// 将导出文档拆分为记录：数组产出其元素，带有 `tests` 或 `issues` 数组的对象产出该数组，其他情况视为单条记录。
pub fn extract_records(document: Value) -> Vec<Value> {
    match document {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            for key in ["tests", "issues"] {
                if matches!(map.get(key), Some(Value::Array(_))) {
                    if let Some(Value::Array(items)) = map.remove(key) {
                        return items;
                    }
                }
            }
            vec![Value::Object(map)]
        }
        other => vec![other],
    }
}

/// Parses `json_text` as an export and maps every record.
/// On failure nothing is returned, so the caller can keep its current tree.
///
/// 将 `json_text` 解析为导出并映射每条记录。失败时不返回任何节点，调用方可以保留当前的树。
pub fn ingest_local_text(json_text: &str) -> Result<Vec<Node>, ImportError> {
    let document: Value = serde_json::from_str(json_text)?;
    if document.is_null() {
        return Err(ImportError::Null);
    }
    Ok(extract_records(document).iter().map(map_record).collect())
}

/// Two-tier discovery against `source`.
///
/// 1. `index.json` lists file names; every listed file contributes its records
///    (arrays are flattened, objects with `tests` contribute that field, other
///    objects contribute themselves). A file that fails to fetch contributes nothing.
/// 2. If that yields no records, `tests.json` is read as a single export.
///
/// Returns `None` when neither tier yields data.
///
/// 针对 `source` 的两级发现。若两级都未产生数据则返回 `None`。
pub async fn fetch_remote(source: &dyn XraySource) -> Option<Vec<Node>> {
    if let Some(Value::Array(index)) = source.fetch_json(INDEX_FILE).await {
        let names: Vec<&str> = index
            .iter()
            .filter_map(|entry| {
                let name = entry.as_str();
                if name.is_none() {
                    tracing::debug!(%entry, "ignoring non-string entry in {INDEX_FILE}");
                }
                name
            })
            .collect();

        let documents =
            futures::future::join_all(names.iter().map(|name| source.fetch_json(name))).await;

        let records: Vec<Value> = documents
            .into_iter()
            .flatten()
            .filter(is_present)
            .flat_map(index_contribution)
            .collect();

        if !records.is_empty() {
            return Some(records.iter().map(map_record).collect());
        }
        tracing::debug!(source = %source.describe(), "index listed no usable records");
    }

    let fallback = source.fetch_json(FALLBACK_FILE).await?;
    if !is_present(&fallback) {
        return None;
    }
    Some(extract_records(fallback).iter().map(map_record).collect())
}

/// Records contributed by one file listed in the index.
fn index_contribution(document: Value) -> Vec<Value> {
    match document {
        Value::Array(items) => items,
        Value::Object(mut map) if map.get("tests").is_some_and(is_present) => {
            match map.remove("tests") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            }
        }
        other => vec![other],
    }
}

fn lookup<'v>(record: &'v Value, path: &[&str]) -> Option<&'v Value> {
    path.iter().try_fold(record, |value, key| value.get(*key))
}

/// Loose truthiness used by the field table: null, `false`, `0` and `""` are absent.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
