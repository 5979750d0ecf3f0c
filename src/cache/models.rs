//! Response cache entry and statistics models.

use std::time::Instant;

/// A memoized provider response.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Raw model output text.
    pub value: String,
    /// When the value was stored; entries older than the TTL are invisible.
    pub stored_at: Instant,
}

/// Statistics for cache operations.
#[derive(Debug, Default, Clone)]
pub struct CacheStats {
    /// Number of successful cache hits.
    pub hits: u64,
    /// Number of cache misses (including expired entries).
    pub misses: u64,
    /// Number of values stored after a compute.
    pub stores: u64,
}
