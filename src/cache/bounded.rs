//! Bounded Timed Cache
//!
//! Thread-safe cache component: one mutex per instance around a [`CacheStore`].

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::cache::clock::duration_ms;
use crate::cache::{CacheStats, CacheStore, Clock, SetOutcome, SystemClock};
use crate::error::Result;

// == Bounded Timed Cache ==
/// A byte-budgeted LRU cache with optional idle expiry, safe to share
/// between threads (wrap it in an `Arc`).
///
/// Every operation runs under the instance's mutex. The clock is read while
/// the lock is held, so timestamps follow the order in which calls were
/// serialized.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use image_cache::cache::BoundedTimedCache;
///
/// let cache = BoundedTimedCache::new(4 * 1024, Some(Duration::from_secs(30))).unwrap();
/// cache.set("avatar:1", vec![0u8; 1024], 1024).unwrap();
/// assert!(cache.get("avatar:1").unwrap().is_some());
/// assert_eq!(cache.occupied_bytes(), 1024);
/// ```
#[derive(Debug)]
pub struct BoundedTimedCache<V, C = SystemClock> {
    state: Mutex<CacheStore<V>>,
    capacity_bytes: usize,
    ttl: Option<Duration>,
    clock: C,
}

impl<V: Clone> BoundedTimedCache<V, SystemClock> {
    // == Constructor ==
    /// Creates a cache on the system clock.
    ///
    /// # Arguments
    /// * `capacity_bytes` - Byte budget, must be greater than 0
    /// * `ttl` - Idle lifetime; None or anything under a millisecond disables expiry
    pub fn new(capacity_bytes: usize, ttl: Option<Duration>) -> Result<Self> {
        Self::with_clock(capacity_bytes, ttl, SystemClock::new())
    }
}

impl<V: Clone, C: Clock> BoundedTimedCache<V, C> {
    /// Creates a cache reading time from `clock`.
    pub fn with_clock(capacity_bytes: usize, ttl: Option<Duration>, clock: C) -> Result<Self> {
        let ttl_ms = ttl.map(duration_ms);
        let store = CacheStore::new(capacity_bytes, ttl_ms)?;
        let ttl = store.ttl_ms().map(Duration::from_millis);

        Ok(Self {
            state: Mutex::new(store),
            capacity_bytes,
            ttl,
            clock,
        })
    }

    fn lock(&self) -> MutexGuard<'_, CacheStore<V>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // == Get ==
    /// Looks up a payload, touching it and sweeping expired entries.
    ///
    /// Fails only for an empty key; a missing key is `Ok(None)`.
    pub fn get(&self, key: &str) -> Result<Option<V>> {
        let mut store = self.lock();
        let now = self.clock.now_ms();
        store.get(key, now)
    }

    // == Set ==
    /// Stores a payload whose byte footprint is `size`.
    ///
    /// Fails only for an empty key. A payload with `size >= capacity()` is
    /// not cached and purges the key (`SetOutcome::TooLarge`).
    pub fn set(&self, key: impl Into<String>, payload: V, size: usize) -> Result<SetOutcome> {
        let key = key.into();
        let mut store = self.lock();
        let now = self.clock.now_ms();
        store.set(key, payload, size, now)
    }

    // == Remove ==
    /// Removes a key, returning the payload if it was cached.
    pub fn remove(&self, key: &str) -> Option<V> {
        if key.is_empty() {
            return None;
        }
        self.lock().remove(key)
    }

    // == Clear ==
    /// Drops every entry. Returns how many were dropped.
    pub fn clear(&self) -> usize {
        self.lock().clear()
    }

    /// Number of live entries. Does not sweep.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Configured byte budget.
    pub fn capacity(&self) -> usize {
        self.capacity_bytes
    }

    /// Bytes currently accounted to live entries.
    pub fn occupied_bytes(&self) -> usize {
        self.lock().occupied_bytes()
    }

    /// Configured idle lifetime, if expiry is enabled.
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }
}
