use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use openrest_core::{parse_openapi_str, DocumentFormat, ErrorKind, ErrorList, OpenApiDocument};

/// Where the specification text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecSource {
    Inline(String),
    Url(String),
    File(PathBuf),
}

impl SpecSource {
    pub fn describe(&self) -> String {
        match self {
            SpecSource::Inline(_) => "inline specification".to_string(),
            SpecSource::Url(url) => url.clone(),
            SpecSource::File(path) => path.display().to_string(),
        }
    }
}

#[async_trait]
pub trait FileSystem: Send + Sync {
    async fn read_to_string(&self, path: &Path) -> std::io::Result<String>;
}

pub struct LocalFileSystem;

#[async_trait]
impl FileSystem for LocalFileSystem {
    async fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        tokio::fs::read_to_string(path).await
    }
}

/// Fetches specification text and parses it into a document.
pub struct SpecLoader {
    client: reqwest::Client,
    fs: Arc<dyn FileSystem>,
}

impl Default for SpecLoader {
    fn default() -> Self {
        Self::new(reqwest::Client::new(), Arc::new(LocalFileSystem))
    }
}

impl SpecLoader {
    pub fn new(client: reqwest::Client, fs: Arc<dyn FileSystem>) -> Self {
        Self { client, fs }
    }

    pub async fn load_text(&self, source: &SpecSource) -> Result<String, ErrorKind> {
        match source {
            SpecSource::Inline(text) => Ok(text.clone()),
            SpecSource::Url(url) => {
                let fail = |m: String| ErrorKind::CouldNotLoadSpecification(format!("{url}: {m}"));
                let resp = self
                    .client
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| fail(e.to_string()))?;
                let status = resp.status();
                if !status.is_success() {
                    return Err(fail(format!("HTTP {status}")));
                }
                resp.text().await.map_err(|e| fail(e.to_string()))
            }
            SpecSource::File(path) => self.fs.read_to_string(path).await.map_err(|e| {
                ErrorKind::CouldNotLoadSpecification(format!("{}: {e}", path.display()))
            }),
        }
    }

    pub async fn load_document(&self, source: &SpecSource) -> Result<OpenApiDocument, ErrorList> {
        let text = self.load_text(source).await?;
        let document = parse_document(&text)?;
        tracing::info!(source = %source.describe(), title = ?document.title(), "loaded OpenAPI document");
        Ok(document)
    }
}

/// Parses specification text, turning every parser diagnostic into its own error.
pub fn parse_document(text: &str) -> Result<OpenApiDocument, ErrorList> {
    parse_openapi_str(text, DocumentFormat::Auto).map_err(|diagnostics| {
        let errors = diagnostics
            .into_iter()
            .map(|d| ErrorKind::InvalidSpecification(d.to_string()).into())
            .collect();
        ErrorList::from_errors(errors).unwrap_or_else(|| {
            ErrorList::single(ErrorKind::InvalidSpecification("document rejected".into()))
        })
    })
}
