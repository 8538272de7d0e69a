//! # Export Sources Module / 导出数据源模块
//!
//! Concrete [`XraySource`] implementations: a server-hosted directory reached
//! over HTTP and a local directory with the same layout, plus reading of a
//! single local export file. Transport and decode failures never propagate out
//! of a fetch; they are logged and reported as "absent".
//!
//! 具体的 [`XraySource`] 实现：通过 HTTP 访问的服务器托管目录以及具有相同布局的本地目录，
//! 还有单个本地导出文件的读取。传输和解码失败不会从获取中传播出去，而是被记录并报告为“不存在”。

use anyhow::{Context, Result, anyhow, ensure};
use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, HeaderValue};
use reqwest::{Client, Url};
use serde_json::Value;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use crate::core::import::{self, ImportError, XraySource};
use crate::core::models::Node;

/// A server-hosted export directory, e.g. `http://host/xray/`.
/// 服务器托管的导出目录，例如 `http://host/xray/`。
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base: Url,
}

impl HttpSource {
    /// Creates a source rooted at `base_url`. A trailing slash is added when
    /// missing so file names resolve inside the directory.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut normalized = base_url.to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base = Url::parse(&normalized)
            .with_context(|| format!("Invalid export base URL: {base_url}"))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// URL of the file `name` inside the base directory. The name is
    /// percent-encoded as one path segment, so `/`, `..` or a full URL can
    /// never leave the base.
    pub fn file_url(&self, name: &str) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("Export base URL cannot hold file names: {}", self.base))?
            .pop_if_empty()
            .push(name);
        Ok(url)
    }

    async fn try_fetch(&self, name: &str) -> Result<Value> {
        let url = self.file_url(name)?;
        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, HeaderValue::from_static("no-store"))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl XraySource for HttpSource {
    fn describe(&self) -> String {
        self.base.to_string()
    }

    async fn fetch_json(&self, name: &str) -> Option<Value> {
        match self.try_fetch(name).await {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(base = %self.base, name, error = %e, "remote fetch failed");
                None
            }
        }
    }
}

/// A local directory laid out like the server-hosted one
/// (`index.json`, listed files, `tests.json`).
///
/// 布局与服务器托管目录相同的本地目录。
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file `name` under the root. Names that are absolute or
    /// step outside the root (`..`, prefixes) are refused.
    pub fn file_path(&self, name: &str) -> Result<PathBuf> {
        let relative = Path::new(name);
        ensure!(
            !name.is_empty()
                && relative
                    .components()
                    .all(|component| matches!(component, Component::Normal(_) | Component::CurDir)),
            "Export file name escapes the directory: {name}"
        );
        Ok(self.root.join(relative))
    }

    async fn try_fetch(&self, name: &str) -> Result<Value> {
        let path = self.file_path(name)?;
        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[async_trait]
impl XraySource for DirSource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    async fn fetch_json(&self, name: &str) -> Option<Value> {
        match self.try_fetch(name).await {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(root = %self.root.display(), name, error = %e, "directory fetch failed");
                None
            }
        }
    }
}

/// Reads and ingests a single local export file.
/// 读取并摄取单个本地导出文件。
pub async fn ingest_local_file(path: &Path) -> Result<Vec<Node>, ImportError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ImportError::Read {
            path: path.display().to_string(),
            source,
        })?;
    import::ingest_local_text(&text)
}
