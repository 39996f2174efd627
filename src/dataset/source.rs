use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

use super::cache::DocumentCache;

/// Where the raw per-year document comes from.
///
/// Implementations only fetch and decode JSON; shaping it into a
/// [`RawDataset`](super::RawDataset) is the loader's job.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Fetch the raw document. May fail; the loader reports failures as
    /// `DataUnavailable`.
    async fn fetch_raw_document(&self) -> Result<serde_json::Value>;

    /// Human-readable label for log lines ("file per_year_data.json").
    fn describe(&self) -> String;
}

/// Local JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    async fn fetch_raw_document(&self) -> Result<serde_json::Value> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read dataset file at {}", self.path.display()))?;

        serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse JSON in {}", self.path.display()))
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// JSON document served over HTTP(S), optionally backed by the disk cache.
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
    cache: Option<DocumentCache>,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("iclr-points/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            url: url.into(),
            client,
            cache: None,
        })
    }

    /// Serve fresh cached copies instead of hitting the network, and store
    /// every successful download.
    pub fn with_cache(mut self, cache: DocumentCache) -> Self {
        self.cache = Some(cache);
        self
    }

    async fn download(&self) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch dataset from {}", self.url))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Dataset request to {} returned HTTP {}", self.url, status);
        }

        let body = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read dataset body from {}", self.url))?;

        Ok(body.to_vec())
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    async fn fetch_raw_document(&self) -> Result<serde_json::Value> {
        if let Some(cache) = &self.cache {
            if let Some(body) = cache.read_fresh(&self.url) {
                log::debug!("Using cached dataset for {}", self.url);
                if let Ok(document) = serde_json::from_slice(&body) {
                    return Ok(document);
                }
                log::warn!("Cached dataset for {} is not valid JSON, refetching", self.url);
            }
        }

        let body = self.download().await?;
        let document = serde_json::from_slice(&body)
            .with_context(|| format!("Failed to parse JSON from {}", self.url))?;

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.write(&self.url, &body) {
                log::warn!("Failed to cache dataset for {}: {:#}", self.url, e);
            }
        }

        Ok(document)
    }

    fn describe(&self) -> String {
        format!("url {}", self.url)
    }
}

/// In-memory document, for embedding a dataset or substituting one in tests.
#[derive(Debug, Clone)]
pub struct StaticSource {
    document: serde_json::Value,
}

impl StaticSource {
    pub fn new(document: serde_json::Value) -> Self {
        Self { document }
    }
}

#[async_trait]
impl DatasetSource for StaticSource {
    async fn fetch_raw_document(&self) -> Result<serde_json::Value> {
        Ok(self.document.clone())
    }

    fn describe(&self) -> String {
        "static document".to_string()
    }
}

/// Pick a source for a `--data` argument: anything with an http(s) scheme is
/// fetched over the network, everything else is a file path.
pub fn source_for(
    location: &str,
    timeout: Duration,
    cache: Option<DocumentCache>,
) -> Result<Box<dyn DatasetSource>> {
    if is_url(location) {
        let mut source = HttpSource::new(location, timeout)?;
        if let Some(cache) = cache {
            source = source.with_cache(cache);
        }
        Ok(Box::new(source))
    } else {
        Ok(Box::new(FileSource::new(location)))
    }
}

pub fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}
