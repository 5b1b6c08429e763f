//! Cache layer
//!
//! In-memory cache (moka) for resolved per-issue article lists. Values are
//! stored as JSON strings so any serializable type fits; expiration is a
//! cache-wide TTL chosen at construction.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use moka::future::Cache;
use serde::{de::DeserializeOwned, Serialize};

/// Default maximum cache capacity (number of entries)
const DEFAULT_MAX_CAPACITY: u64 = 10_000;

/// Cache entry wrapper that stores serialized JSON data
#[derive(Clone)]
struct CacheEntry {
    data: Arc<String>,
}

impl CacheEntry {
    fn new<T: Serialize>(value: &T) -> Result<Self> {
        let json = serde_json::to_string(value).context("Failed to serialize cache value")?;
        Ok(Self {
            data: Arc::new(json),
        })
    }

    fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.data).context("Failed to deserialize cache value")
    }
}

/// In-memory cache using moka
pub struct MemoryCache {
    cache: Cache<String, CacheEntry>,
    ttl: Duration,
}

impl std::fmt::Debug for MemoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCache")
            .field("entry_count", &self.cache.entry_count())
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl MemoryCache {
    /// Create a cache whose entries expire after `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(DEFAULT_MAX_CAPACITY, ttl)
    }

    pub fn with_capacity(max_capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();
        Self { cache, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get a value from cache
    ///
    /// A deserialization mismatch (entry written by an older shape) reads
    /// as a miss rather than an error.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let entry = self.cache.get(key).await?;
        entry.deserialize().ok()
    }

    /// Set a value in cache
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let entry = CacheEntry::new(value)?;
        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    /// Delete a value from cache
    pub async fn delete(&self, key: &str) {
        self.cache.invalidate(key).await;
    }

    /// Clear all cache entries
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        cache.set("key", &vec!["a".to_string()]).await.unwrap();
        let got: Option<Vec<String>> = cache.get("key").await;
        assert_eq!(got, Some(vec!["a".to_string()]));
    }

    #[tokio::test]
    async fn missing_key_is_none() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        let got: Option<Vec<String>> = cache.get("absent").await;
        assert_eq!(got, None);
    }

    #[tokio::test]
    async fn shape_mismatch_reads_as_miss() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        cache.set("key", &"just a string").await.unwrap();
        let got: Option<Vec<u64>> = cache.get("key").await;
        assert_eq!(got, None);
    }

    #[tokio::test]
    async fn delete_removes_entry() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        cache.set("key", &1u32).await.unwrap();
        cache.delete("key").await;
        let got: Option<u32> = cache.get("key").await;
        assert_eq!(got, None);
    }
}
