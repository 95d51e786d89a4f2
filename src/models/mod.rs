//! Response models for the admin API
//!
//! This module defines the DTOs serialized into HTTP response bodies.
//! Error bodies come from `CacheError`'s `IntoResponse` implementation.

pub mod responses;

// Re-export commonly used types
pub use responses::{ClearResponse, HealthResponse, RemoveResponse, StatsResponse};
