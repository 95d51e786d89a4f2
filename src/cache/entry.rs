//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

// == Cache Entry ==
/// A cached payload with its byte footprint and last-touch timestamp.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored payload
    pub payload: V,
    /// Byte footprint supplied by the caller
    pub size: usize,
    /// Last touch on the cache clock (milliseconds); None when TTL is disabled
    pub last_accessed: Option<u64>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry, stamped at `now_ms` only when a TTL is in force.
    pub fn new(payload: V, size: usize, now_ms: Option<u64>) -> Self {
        Self {
            payload,
            size,
            last_accessed: now_ms,
        }
    }

    // == Touch ==
    /// Refreshes the timestamp if this entry is being timed.
    pub fn touch(&mut self, now_ms: u64) {
        if let Some(last) = self.last_accessed.as_mut() {
            *last = now_ms;
        }
    }

    // == Is Expired ==
    /// Checks whether more than `ttl_ms` has elapsed since the last touch.
    ///
    /// The comparison is strict: an entry touched exactly `ttl_ms` ago is
    /// still live. Untimed entries never expire.
    pub fn is_expired(&self, now_ms: u64, ttl_ms: u64) -> bool {
        self.idle_ms(now_ms).is_some_and(|idle| idle > ttl_ms)
    }

    // == Idle Time ==
    /// Milliseconds since the last touch, or None for untimed entries.
    pub fn idle_ms(&self, now_ms: u64) -> Option<u64> {
        self.last_accessed.map(|last| now_ms.saturating_sub(last))
    }
}
