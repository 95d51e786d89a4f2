//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking, a running
//! byte total and TTL expiration. Single-threaded; time is supplied by the caller.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, LruTracker};
use crate::error::{CacheError, Result};

// == Set Outcome ==
/// What a size-aware `set` did with the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// The payload is cached. Counts other entries removed on the way.
    Stored { evicted: usize, expired: usize },
    /// The payload was at least as large as the whole budget and was not
    /// cached. Any previous entry under the key is gone.
    TooLarge,
}

impl SetOutcome {
    pub fn is_stored(&self) -> bool {
        matches!(self, SetOutcome::Stored { .. })
    }
}

// == Cache Store ==
/// Cache state with a byte budget, LRU eviction and optional idle TTL.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Byte budget
    capacity_bytes: usize,
    /// Sum of `size` over live entries
    occupied_bytes: usize,
    /// Idle lifetime in milliseconds; None disables expiry
    ttl_ms: Option<u64>,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore with a byte budget and optional TTL.
    ///
    /// # Arguments
    /// * `capacity_bytes` - Byte budget, must be greater than 0
    /// * `ttl_ms` - Idle lifetime in milliseconds; None or 0 disables expiry
    pub fn new(capacity_bytes: usize, ttl_ms: Option<u64>) -> Result<Self> {
        if capacity_bytes == 0 {
            return Err(CacheError::invalid(
                "the maximum number of bytes the cache holds must be greater than 0",
            ));
        }

        Ok(Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            capacity_bytes,
            occupied_bytes: 0,
            ttl_ms: ttl_ms.filter(|&ms| ms > 0),
        })
    }

    // == Set ==
    /// Stores a payload with its caller-supplied byte size.
    ///
    /// A payload with `size >= capacity` is refused and purges any existing
    /// entry for the key. Otherwise the previous entry is dropped, expired
    /// entries are swept, least recently used entries are evicted until the
    /// payload fits, and the new entry becomes most recently used.
    ///
    /// # Arguments
    /// * `key` - Non-empty key
    /// * `payload` - The payload to store
    /// * `size` - Byte footprint of `payload`
    /// * `now_ms` - Current clock reading
    pub fn set(&mut self, key: String, payload: V, size: usize, now_ms: u64) -> Result<SetOutcome> {
        validate_key(&key)?;

        if size >= self.capacity_bytes {
            self.remove(&key);
            self.stats.record_rejection();
            debug!(
                key = %key,
                size,
                capacity = self.capacity_bytes,
                "payload too large to cache"
            );
            return Ok(SetOutcome::TooLarge);
        }

        // Room is made before the entry goes in, so the byte total never
        // exceeds the budget and cannot overflow.
        self.remove(&key);
        let expired = self.sweep_expired(now_ms);
        let evicted = self.evict_until_fits(size);

        let stamp = self.ttl_ms.map(|_| now_ms);
        self.entries
            .insert(key.clone(), CacheEntry::new(payload, size, stamp));
        self.occupied_bytes += size;
        self.lru.touch(&key);

        Ok(SetOutcome::Stored { evicted, expired })
    }

    // == Get ==
    /// Retrieves a payload by key.
    ///
    /// A hit is touched (timestamp and recency) before the sweep runs, so it
    /// cannot be swept by the same call.
    ///
    /// # Arguments
    /// * `key` - Non-empty key
    /// * `now_ms` - Current clock reading
    pub fn get(&mut self, key: &str, now_ms: u64) -> Result<Option<V>> {
        validate_key(key)?;

        if let Some(entry) = self.entries.get_mut(key) {
            entry.touch(now_ms);
            self.lru.touch(key);
        }

        self.sweep_expired(now_ms);

        let value = self.entries.get(key).map(|entry| entry.payload.clone());
        if value.is_some() {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }
        Ok(value)
    }

    // == Remove ==
    /// Removes an entry by key, returning its payload.
    ///
    /// Unknown and empty keys are a no-op.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let entry = self.entries.remove(key)?;
        self.lru.remove(key);
        self.occupied_bytes -= entry.size;
        Some(entry.payload)
    }

    // == Clear ==
    /// Drops every entry. Returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        self.lru.clear();
        self.occupied_bytes = 0;
        dropped
    }

    // == Sweep Expired ==
    /// Removes every entry idle for longer than the TTL.
    ///
    /// Timestamps only move forward and every refresh is also a recency
    /// touch, so expired entries always sit at the LRU end. The sweep stops
    /// at the first live entry. Returns the number of entries removed.
    pub fn sweep_expired(&mut self, now_ms: u64) -> usize {
        let Some(ttl_ms) = self.ttl_ms else {
            return 0;
        };

        let mut removed = 0;
        let mut freed = 0;
        loop {
            let expired = self
                .lru
                .peek_oldest()
                .and_then(|key| self.entries.get(key))
                .is_some_and(|entry| entry.is_expired(now_ms, ttl_ms));
            if !expired {
                break;
            }

            let Some(key) = self.lru.evict_oldest() else {
                break;
            };
            if let Some(entry) = self.entries.remove(&key) {
                freed += entry.size;
                removed += 1;
            }
        }
        self.occupied_bytes -= freed;

        if removed > 0 {
            self.stats.record_expirations(removed);
            debug!(removed, freed_bytes = freed, "swept expired entries");
        }
        removed
    }

    /// Evicts least recently used entries until `incoming` more bytes fit
    /// within the budget. Requires `incoming < capacity_bytes`.
    fn evict_until_fits(&mut self, incoming: usize) -> usize {
        let limit = self.capacity_bytes - incoming;
        let mut evicted = 0;
        while self.occupied_bytes > limit {
            let Some(key) = self.lru.evict_oldest() else {
                break;
            };
            if let Some(entry) = self.entries.remove(&key) {
                self.occupied_bytes -= entry.size;
            }
            self.stats.record_eviction();
            evicted += 1;
            debug!(key = %key, occupied = self.occupied_bytes, "evicted least recently used entry");
        }
        evicted
    }

    // == Accessors ==
    /// Returns true if the key is cached. Does not touch or sweep.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity_bytes(&self) -> usize {
        self.capacity_bytes
    }

    pub fn occupied_bytes(&self) -> usize {
        self.occupied_bytes
    }

    pub fn ttl_ms(&self) -> Option<u64> {
        self.ttl_ms
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.entries.len();
        stats.occupied_bytes = self.occupied_bytes;
        stats.capacity_bytes = self.capacity_bytes;
        stats
    }

    /// Recomputes the byte total from the live entries.
    #[cfg(test)]
    pub(crate) fn live_bytes(&self) -> usize {
        self.entries.values().map(|entry| entry.size).sum()
    }
}

/// Rejects keys the cache cannot store.
fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::invalid("key must not be empty"));
    }
    Ok(())
}
