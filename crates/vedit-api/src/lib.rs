//! Axum HTTP API server.
//!
//! This crate provides:
//! - The upload endpoint and the three processing endpoints
//! - Template listing and a minimal HTML index page
//! - Static artifact serving straight from the store directory
//! - Request-id and request-logging middleware, CORS, graceful shutdown

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
