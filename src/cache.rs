//! Time-boxed analysis cache
//!
//! A small file-backed store for analysis results keyed by the submitted URL.
//! Entries carry a write timestamp and expire after 24 hours; expired entries
//! are removed on read. The cache is an explicit service instance constructed
//! once and passed to callers, so tests can run against isolated directories.

use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, warn};

use crate::analyzer::AnalysisResult;

/// Entry lifetime in milliseconds (24 hours)
const CACHE_TTL_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// Key prefix shared by all cache entries
const KEY_PREFIX: &str = "airra:";

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Base path for cache files
    pub base_path: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from(".airra/cache"),
        }
    }
}

/// Error type for cache operations
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<CacheError> for crate::Error {
    fn from(err: CacheError) -> Self {
        crate::Error::Cache(err.to_string())
    }
}

type Result<T> = std::result::Result<T, CacheError>;

/// On-disk shape of a cache entry
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    data: AnalysisResult,
    timestamp: i64,
}

/// File-backed cache for analysis results.
#[derive(Debug, Clone, Default)]
pub struct AnalysisCache {
    config: CacheConfig,
}

impl AnalysisCache {
    /// Create a cache with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache with a custom configuration
    pub fn with_config(config: CacheConfig) -> Self {
        Self { config }
    }

    /// Look up a fresh entry for `url`.
    ///
    /// Absent, expired, and unreadable entries all report a miss; an expired
    /// entry is removed on the way out. Corruption is logged, never raised.
    pub async fn get(&self, url: &str) -> Option<AnalysisResult> {
        match self.read_entry(url).await {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Failed to read cache entry for {}: {}", url, e);
                None
            }
        }
    }

    /// Store an analysis result for `url`, stamped with the current time.
    pub async fn set(&self, url: &str, data: &AnalysisResult) -> Result<()> {
        let path = self.entry_path(url);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let entry = CacheEntry {
            data: data.clone(),
            timestamp: Utc::now().timestamp_millis(),
        };
        fs::write(&path, serde_json::to_vec(&entry)?).await?;

        debug!("Cached analysis for {} at {}", url, path.display());
        Ok(())
    }

    /// Remove the entry for `url`, if any.
    pub async fn clear(&self, url: &str) -> Result<()> {
        match fs::remove_file(self.entry_path(url)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn read_entry(&self, url: &str) -> Result<Option<AnalysisResult>> {
        let path = self.entry_path(url);
        let raw = match fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let entry: CacheEntry = serde_json::from_slice(&raw)?;

        if Utc::now().timestamp_millis() - entry.timestamp > CACHE_TTL_MILLIS {
            debug!("Cache entry for {} expired", url);
            self.remove_quietly(&path).await;
            return Ok(None);
        }

        Ok(Some(entry.data))
    }

    async fn remove_quietly(&self, path: &Path) {
        if let Err(e) = fs::remove_file(path).await {
            if e.kind() != io::ErrorKind::NotFound {
                warn!("Failed to remove expired cache entry {}: {}", path.display(), e);
            }
        }
    }

    /// Map a URL to its cache file path.
    ///
    /// The key keeps the `airra:` prefix of the original storage scheme;
    /// non-alphanumeric characters are flattened to underscores.
    fn entry_path(&self, url: &str) -> PathBuf {
        let key = format!("{}{}", KEY_PREFIX, url);
        let filename: String = key
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect();
        self.config.base_path.join(format!("{}.json", filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn sample_analysis() -> AnalysisResult {
        let mut suggested_permissions = HashMap::new();
        suggested_permissions.insert("article".to_string(), vec!["inference".to_string()]);

        AnalysisResult {
            content_types: vec!["article".to_string()],
            suggested_permissions,
            attribution_requirements: vec!["Credit the author".to_string()],
            restrictions: Vec::new(),
        }
    }

    fn cache_in(dir: &tempfile::TempDir) -> AnalysisCache {
        AnalysisCache::with_config(CacheConfig {
            base_path: dir.path().to_path_buf(),
        })
    }

    #[tokio::test]
    async fn test_set_then_get_round_trips() {
        let dir = tempdir().unwrap();
        let cache = cache_in(&dir);

        let analysis = sample_analysis();
        cache.set("https://example.com", &analysis).await.unwrap();

        let cached = cache.get("https://example.com").await;
        assert_eq!(cached, Some(analysis));
    }

    #[tokio::test]
    async fn test_absent_key_is_a_miss() {
        let dir = tempdir().unwrap();
        let cache = cache_in(&dir);

        assert_eq!(cache.get("https://example.com").await, None);
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss_and_is_removed() {
        let dir = tempdir().unwrap();
        let cache = cache_in(&dir);

        // Write an entry stamped 25 hours in the past
        let entry = CacheEntry {
            data: sample_analysis(),
            timestamp: Utc::now().timestamp_millis() - 25 * 60 * 60 * 1000,
        };
        let path = cache.entry_path("https://example.com");
        fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        fs::write(&path, serde_json::to_vec(&entry).unwrap())
            .await
            .unwrap();

        assert_eq!(cache.get("https://example.com").await, None);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_a_miss() {
        let dir = tempdir().unwrap();
        let cache = cache_in(&dir);

        let path = cache.entry_path("https://example.com");
        fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        fs::write(&path, b"not json").await.unwrap();

        assert_eq!(cache.get("https://example.com").await, None);
    }

    #[tokio::test]
    async fn test_clear_removes_the_entry() {
        let dir = tempdir().unwrap();
        let cache = cache_in(&dir);

        cache
            .set("https://example.com", &sample_analysis())
            .await
            .unwrap();
        cache.clear("https://example.com").await.unwrap();

        assert_eq!(cache.get("https://example.com").await, None);

        // Clearing an absent key is fine
        cache.clear("https://example.com").await.unwrap();
    }

    #[test]
    fn test_entry_path_is_sanitized() {
        let cache = AnalysisCache::new();
        let path = cache.entry_path("https://example.com/a?b=c");
        let filename = path.file_name().unwrap().to_str().unwrap();

        assert!(filename.starts_with("airra_"));
        assert!(filename.ends_with(".json"));
        assert!(!filename.contains('/'));
        assert!(!filename.contains(':'));
    }
}
