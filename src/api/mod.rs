//! API Module
//!
//! Admin and diagnostics HTTP surface for an embedded image cache. Payloads
//! never leave the process; these endpoints only report on and prune the cache.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /stats` - Cache statistics
//! - `DELETE /cache` - Clear the cache
//! - `DELETE /cache/:key` - Remove one key

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
