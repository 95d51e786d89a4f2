//! Cache Module
//!
//! Provides in-memory caching with a byte budget, LRU eviction and idle TTL expiration.

mod bounded;
mod clock;
mod entry;
mod lru;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use bounded::BoundedTimedCache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::{CacheStore, SetOutcome};

// == Public Constants ==
/// One mebibyte, the unit capacities are usually expressed in
pub const MEGABYTE: usize = 1024 * 1024;
