use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Get the platform-appropriate cache directory for downloaded datasets
pub fn get_cache_path() -> PathBuf {
    dirs::cache_dir()
        .map(|p| p.join("iclr-points/datasets"))
        .unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}/.cache/iclr-points/datasets",
                std::env::var("HOME").unwrap_or_default()
            ))
        })
}

/// Remove the dataset cache directory
pub fn clear_cache(cache_path: &std::path::Path) -> Result<()> {
    match std::fs::remove_dir_all(cache_path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).context("Failed to remove cache directory"),
    }
}

/// Serialized form of a cached document
#[derive(Debug, Serialize, Deserialize)]
struct CachedDocument {
    fetched_at: DateTime<Utc>,
    body: Vec<u8>,
}

/// Disk cache for raw dataset documents, keyed by source URL.
///
/// Only the source document is stored, never computed scores. Entries older
/// than `ttl` are treated as misses.
#[derive(Debug, Clone)]
pub struct DocumentCache {
    cache_path: PathBuf,
    ttl: Duration,
}

impl DocumentCache {
    pub fn new(cache_path: PathBuf, ttl: std::time::Duration) -> Self {
        Self {
            cache_path,
            ttl: Duration::from_std(ttl).unwrap_or(Duration::MAX),
        }
    }

    /// Body of a cached document if present and younger than the TTL
    pub fn read_fresh(&self, key: &str) -> Option<Vec<u8>> {
        self.read_fresh_at(key, Utc::now())
    }

    fn read_fresh_at(&self, key: &str, now: DateTime<Utc>) -> Option<Vec<u8>> {
        let bytes = cacache::read_sync(&self.cache_path, cache_key(key)).ok()?;
        let cached: CachedDocument = serde_json::from_slice(&bytes).ok()?;

        if now.signed_duration_since(cached.fetched_at) < self.ttl {
            Some(cached.body)
        } else {
            None
        }
    }

    pub fn write(&self, key: &str, body: &[u8]) -> Result<()> {
        self.write_at(key, body, Utc::now())
    }

    fn write_at(&self, key: &str, body: &[u8], fetched_at: DateTime<Utc>) -> Result<()> {
        let entry = CachedDocument {
            fetched_at,
            body: body.to_vec(),
        };
        let json = serde_json::to_vec(&entry).context("Failed to serialize cache entry")?;
        cacache::write_sync(&self.cache_path, cache_key(key), &json)
            .context("Failed to write cache entry")?;
        Ok(())
    }
}

fn cache_key(url: &str) -> String {
    format!("dataset:{}", url)
}
