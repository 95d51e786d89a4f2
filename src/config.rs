//! Configuration Module
//!
//! Handles loading cache and server configuration from environment variables,
//! and derives the default byte budget from the host's memory class.

use std::env;
use std::time::Duration;

use crate::cache::MEGABYTE;
use crate::error::{CacheError, Result};
use crate::pipeline::{AllocationSizer, ImageCache};

/// Upper bound for a cache sized from the memory class
pub const MAX_MEMORY_CACHE_BYTES: usize = 30 * MEGABYTE;

// == Memory Profile ==
/// Memory characteristics of the host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryProfile {
    /// Standard per-application memory class in MiB
    pub memory_class_mb: usize,
    /// Memory class granted to large-heap applications, when known
    pub large_memory_class_mb: Option<usize>,
    /// Whether the application asked for a large heap
    pub large_heap: bool,
}

impl MemoryProfile {
    /// Default cache budget: roughly 15% (one seventh) of the memory class,
    /// capped at [`MAX_MEMORY_CACHE_BYTES`].
    pub fn cache_size_bytes(&self) -> usize {
        let class_mb = match (self.large_heap, self.large_memory_class_mb) {
            (true, Some(large)) => large,
            _ => self.memory_class_mb,
        };
        (MEGABYTE.saturating_mul(class_mb) / 7).min(MAX_MEMORY_CACHE_BYTES)
    }
}

// == Config ==
/// Cache and server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Explicit byte budget; overrides the memory profile when set
    pub max_bytes: Option<usize>,
    /// Host memory characteristics used when no explicit budget is given
    pub memory: MemoryProfile,
    /// Idle TTL in milliseconds; zero or negative disables expiry
    pub ttl_ms: i64,
    /// Admin HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_BYTES` - Explicit byte budget (default: derived from memory class)
    /// - `MEMORY_CLASS_MB` - Application memory class in MiB (default: 64)
    /// - `LARGE_MEMORY_CLASS_MB` - Large-heap memory class in MiB (default: unset)
    /// - `LARGE_HEAP` - Whether a large heap is in use (default: false)
    /// - `CACHE_TTL_MS` - Idle TTL in milliseconds, <= 0 disables (default: -1)
    /// - `SERVER_PORT` - Admin HTTP port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_bytes: env::var("CACHE_MAX_BYTES")
                .ok()
                .and_then(|v| v.parse().ok()),
            memory: MemoryProfile {
                memory_class_mb: env::var("MEMORY_CLASS_MB")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.memory.memory_class_mb),
                large_memory_class_mb: env::var("LARGE_MEMORY_CLASS_MB")
                    .ok()
                    .and_then(|v| v.parse().ok()),
                large_heap: env::var("LARGE_HEAP")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.memory.large_heap),
            },
            ttl_ms: env::var("CACHE_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.ttl_ms),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
        }
    }

    /// Byte budget the cache will be built with.
    pub fn capacity_bytes(&self) -> usize {
        self.max_bytes
            .unwrap_or_else(|| self.memory.cache_size_bytes())
    }

    /// Idle TTL, or None when expiry is disabled.
    pub fn ttl(&self) -> Option<Duration> {
        u64::try_from(self.ttl_ms)
            .ok()
            .filter(|&ms| ms > 0)
            .map(Duration::from_millis)
    }

    /// Builds the image cache this configuration describes.
    pub fn build_cache(&self) -> Result<ImageCache> {
        let capacity = self.capacity_bytes();
        ImageCache::new(capacity, self.ttl(), AllocationSizer).map_err(|err| {
            CacheError::Config(format!("cannot build a cache of {} bytes: {}", capacity, err))
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_bytes: None,
            memory: MemoryProfile {
                memory_class_mb: 64,
                large_memory_class_mb: None,
                large_heap: false,
            },
            ttl_ms: -1,
            server_port: 3000,
        }
    }
}
