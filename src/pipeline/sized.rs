//! Sized Cache Adapter
//!
//! Plugs a [`BoundedTimedCache`] into an image pipeline that only knows keys
//! and payloads. The byte size comes from an injected [`ByteSizer`].

use std::time::Duration;

use tracing::debug;

use crate::cache::{BoundedTimedCache, CacheStats, Clock, SetOutcome, SystemClock};
use crate::error::Result;

// == Byte Sizer ==
/// Computes the byte footprint of a payload.
pub trait ByteSizer<V>: Send + Sync {
    fn byte_count(&self, payload: &V) -> usize;
}

impl<V, F> ByteSizer<V> for F
where
    F: Fn(&V) -> usize + Send + Sync,
{
    fn byte_count(&self, payload: &V) -> usize {
        self(payload)
    }
}

// == Image Store ==
/// The storage capabilities an image pipeline needs from its memory cache.
pub trait ImageStore<V> {
    /// Looks up a payload. A missing key is `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<V>>;

    /// Caches a payload. Payloads too large for the cache are dropped silently.
    fn set(&self, key: &str, payload: V) -> Result<()>;

    /// Number of cached entries.
    fn size(&self) -> usize;

    /// Configured capacity in bytes.
    fn max_size(&self) -> usize;

    fn clear(&self);
}

// == Sized Cache ==
/// A [`BoundedTimedCache`] paired with the sizer used for every `set`.
#[derive(Debug)]
pub struct SizedCache<V, S, C = SystemClock> {
    cache: BoundedTimedCache<V, C>,
    sizer: S,
}

impl<V: Clone, S: ByteSizer<V>> SizedCache<V, S, SystemClock> {
    pub fn new(capacity_bytes: usize, ttl: Option<Duration>, sizer: S) -> Result<Self> {
        Ok(Self::from_cache(BoundedTimedCache::new(capacity_bytes, ttl)?, sizer))
    }
}

impl<V: Clone, S: ByteSizer<V>, C: Clock> SizedCache<V, S, C> {
    pub fn from_cache(cache: BoundedTimedCache<V, C>, sizer: S) -> Self {
        Self { cache, sizer }
    }

    /// Sizes the payload and stores it, reporting what happened.
    pub fn insert(&self, key: &str, payload: V) -> Result<SetOutcome> {
        let size = self.sizer.byte_count(&payload);
        self.cache.set(key, payload, size)
    }

    /// Removes a key, returning the payload if it was cached.
    pub fn remove(&self, key: &str) -> Option<V> {
        self.cache.remove(key)
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn sizer(&self) -> &S {
        &self.sizer
    }

    /// The underlying size-aware cache.
    pub fn cache(&self) -> &BoundedTimedCache<V, C> {
        &self.cache
    }
}

impl<V: Clone, S: ByteSizer<V>, C: Clock> ImageStore<V> for SizedCache<V, S, C> {
    fn get(&self, key: &str) -> Result<Option<V>> {
        self.cache.get(key)
    }

    fn set(&self, key: &str, payload: V) -> Result<()> {
        if self.insert(key, payload)? == SetOutcome::TooLarge {
            debug!(key, "pipeline payload not cached");
        }
        Ok(())
    }

    fn size(&self) -> usize {
        self.cache.len()
    }

    fn max_size(&self) -> usize {
        self.cache.capacity()
    }

    fn clear(&self) {
        self.cache.clear();
    }
}
