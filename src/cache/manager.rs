// Response cache - TTL memoization of successful provider calls

use crate::cache::models::{CacheEntry, CacheStats};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::metrics;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory TTL cache for raw model output.
///
/// Strictly best-effort and transparent: a miss of any kind (absent, expired,
/// caching disabled) runs `compute`; only successful results are stored.
/// Eviction is TTL-only with lazy purge on lookup — unbounded by design at
/// this scale, a production deployment needs a size cap or an external store.
pub struct ResponseCache {
    config: CacheConfig,
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    stats: Arc<RwLock<CacheStats>>,
}

impl ResponseCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            entries: Arc::new(RwLock::new(HashMap::new())),
            stats: Arc::new(RwLock::new(CacheStats::default())),
        }
    }

    /// Generate a SHA-256 cache key from order-sensitive call parts
    /// (feature name, prompt, modality, image digest, ...).
    pub fn cache_key(parts: &[&str]) -> String {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update(part.as_bytes());
            // Separator keeps ("ab","c") distinct from ("a","bc")
            hasher.update([0u8]);
        }
        format!("{:x}", hasher.finalize())
    }

    /// Return the live cached value for `key`, or run `compute`, store its
    /// result under `key` and return it.
    pub async fn get_or_compute<F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        compute: F,
    ) -> Result<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        if !self.config.enabled {
            return compute().await;
        }

        {
            let mut entries = self.entries.write().await;
            match entries.get(key) {
                Some(entry) if entry.stored_at.elapsed() < ttl => {
                    debug!("Cache hit for key {}", &key[..16.min(key.len())]);
                    self.stats.write().await.hits += 1;
                    metrics::record_cache_hit();
                    return Ok(entry.value.clone());
                }
                Some(_) => {
                    // Expired entries are treated as absent, purged on lookup
                    entries.remove(key);
                }
                None => {}
            }
        }

        self.stats.write().await.misses += 1;
        metrics::record_cache_miss();

        let value = compute().await?;

        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            CacheEntry {
                value: value.clone(),
                stored_at: Instant::now(),
            },
        );
        metrics::update_cache_entries(entries.len());
        drop(entries);

        self.stats.write().await.stores += 1;
        Ok(value)
    }

    /// Get cache statistics
    pub async fn get_stats(&self) -> CacheStats {
        self.stats.read().await.clone()
    }

    /// Clear all cached entries
    pub async fn clear(&self) {
        self.entries.write().await.clear();
        debug!("Response cache cleared");
    }
}
