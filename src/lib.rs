//! Image Cache - A bounded in-memory cache for decoded images
//!
//! Enforces a total byte budget with LRU eviction and an optional idle TTL,
//! behind one lock per instance. Ships a pipeline-facing storage trait and a
//! small admin HTTP surface.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;

pub use api::AppState;
pub use cache::{BoundedTimedCache, SetOutcome};
pub use config::Config;
pub use error::{CacheError, Result};
pub use pipeline::{DecodedImage, ImageCache, ImageStore, PixelFormat};
