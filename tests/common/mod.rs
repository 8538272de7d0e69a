// Shared test helpers for unit and integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use catalog_viewer::core::import::XraySource;
use catalog_viewer::models::Node;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

/// A three-level forest with a duplicated name and a "file:line" style id.
pub fn sample_forest() -> Vec<Node> {
    vec![
        Node::suite(
            "suite-login",
            "Login",
            vec![
                Node::leaf("login.spec.ts:12", "Accepts valid password")
                    .with_description("Happy path"),
                Node::leaf("login.spec.ts:40", "Rejects <script> & friends")
                    .with_description("Escaping"),
            ],
        )
        .with_description("Authentication"),
        Node::suite(
            "suite-cart",
            "Cart",
            vec![Node::suite(
                "cart-nested",
                "Nested",
                vec![Node::leaf("cart-1", "Adds item")],
            )],
        ),
        Node::leaf("orphan", "Standalone check"),
    ]
}

/// An in-memory export directory. Names missing from the map fail to fetch.
#[derive(Debug, Default)]
pub struct MemorySource {
    files: HashMap<String, Value>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: Value) -> Self {
        self.files.insert(name.to_string(), value);
        self
    }
}

#[async_trait]
impl XraySource for MemorySource {
    fn describe(&self) -> String {
        "memory://xray/".to_string()
    }

    async fn fetch_json(&self, name: &str) -> Option<Value> {
        self.files.get(name).cloned()
    }
}

/// Creates a temporary export directory holding the given files.
pub fn export_dir(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    for (name, content) in files {
        fs::write(temp_dir.path().join(name), content).expect("Failed to write export file");
    }
    temp_dir
}

/// Writes a config file pointing the preferences into `temp_dir`.
pub fn write_config(temp_dir: &TempDir) -> PathBuf {
    let prefs_path = temp_dir.path().join("prefs.json");
    let config_path = temp_dir.path().join("CatalogViewer.toml");
    let content = format!(
        "language = \"en\"\n\n[prefs]\npath = \"{}\"\n",
        prefs_path.display().to_string().replace('\\', "/")
    );
    fs::write(&config_path, content).expect("Failed to write config file");
    config_path
}
