//! API Handlers
//!
//! HTTP request handlers for the cache admin endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::models::{ClearResponse, HealthResponse, RemoveResponse, StatsResponse};
use crate::pipeline::{ByteSizer, ImageCache};

/// Application state shared across all handlers.
///
/// The cache synchronizes internally, so the state only needs an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Shared image cache
    pub cache: Arc<ImageCache>,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: ImageCache) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.build_cache()?))
    }
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.cache();
    let ttl_ms = cache.ttl().map(|ttl| ttl.as_millis() as u64);

    Json(StatsResponse::new(&cache.stats(), ttl_ms))
}

/// Handler for DELETE /cache
///
/// Drops every cached image.
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let cleared = state.cache.cache().clear();
    info!("Cache cleared: {} entries dropped", cleared);

    Json(ClearResponse::new(cleared))
}

/// Handler for DELETE /cache/:key
///
/// Removes one image. A key that is not cached is reported, not rejected.
pub async fn remove_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<RemoveResponse> {
    let freed = state
        .cache
        .remove(&key)
        .map(|image| state.cache.sizer().byte_count(&image));

    Json(RemoveResponse::new(key, freed))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{AllocationSizer, DecodedImage, ImageStore, PixelFormat};

    fn test_state() -> AppState {
        AppState::new(ImageCache::new(1024 * 1024, None, AllocationSizer).unwrap())
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = test_state();
        state
            .cache
            .set("a", DecodedImage::new(10, 10, PixelFormat::Alpha8))
            .unwrap();
        state.cache.get("a").unwrap();
        state.cache.get("b").unwrap();

        let response = stats_handler(State(state)).await;
        assert_eq!(response.hits, 1);
        assert_eq!(response.misses, 1);
        assert_eq!(response.occupied_bytes, 100);
        assert_eq!(response.ttl_ms, None);
    }

    #[tokio::test]
    async fn test_clear_handler() {
        let state = test_state();
        state
            .cache
            .set("a", DecodedImage::new(10, 10, PixelFormat::Alpha8))
            .unwrap();

        let response = clear_handler(State(state.clone())).await;
        assert_eq!(response.cleared, 1);
        assert_eq!(state.cache.size(), 0);
    }

    #[tokio::test]
    async fn test_remove_handler() {
        let state = test_state();
        state
            .cache
            .set("b", DecodedImage::new(200, 200, PixelFormat::Alpha8))
            .unwrap();

        let response = remove_handler(State(state.clone()), Path("b".to_string())).await;
        assert!(response.removed);
        assert_eq!(response.freed_bytes, 40_000);
        assert_eq!(state.cache.cache().occupied_bytes(), 0);
    }

    #[tokio::test]
    async fn test_remove_handler_missing_key() {
        let state = test_state();

        let response = remove_handler(State(state), Path("missing".to_string())).await;
        assert!(!response.removed);
        assert_eq!(response.freed_bytes, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_state_from_config() {
        let config = Config {
            max_bytes: Some(2048),
            ..Config::default()
        };
        let state = AppState::from_config(&config).unwrap();
        assert_eq!(state.cache.max_size(), 2048);
    }
}
