//! Response DTOs for the admin API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of lookups that found a payload
    pub hits: u64,
    /// Number of lookups that found nothing
    pub misses: u64,
    /// Number of LRU evictions
    pub evictions: u64,
    /// Number of entries removed by TTL sweeps
    pub expirations: u64,
    /// Number of payloads refused as too large
    pub rejections: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Bytes held by live entries
    pub occupied_bytes: usize,
    /// Configured byte budget
    pub capacity_bytes: usize,
    /// Idle TTL in milliseconds, absent when expiry is disabled
    pub ttl_ms: Option<u64>,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(stats: &CacheStats, ttl_ms: Option<u64>) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            rejections: stats.rejections,
            total_entries: stats.total_entries,
            occupied_bytes: stats.occupied_bytes,
            capacity_bytes: stats.capacity_bytes,
            ttl_ms,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for clearing the cache (DELETE /cache)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
    /// Entries dropped
    pub cleared: usize,
}

impl ClearResponse {
    pub fn new(cleared: usize) -> Self {
        Self {
            message: format!("Cleared {} entries", cleared),
            cleared,
        }
    }
}

/// Response body for removing one key (DELETE /cache/:key)
#[derive(Debug, Clone, Serialize)]
pub struct RemoveResponse {
    /// The key that was requested
    pub key: String,
    /// Whether anything was cached under the key
    pub removed: bool,
    /// Bytes released by the removal
    pub freed_bytes: usize,
}

impl RemoveResponse {
    pub fn new(key: impl Into<String>, freed_bytes: Option<usize>) -> Self {
        Self {
            key: key.into(),
            removed: freed_bytes.is_some(),
            freed_bytes: freed_bytes.unwrap_or(0),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
