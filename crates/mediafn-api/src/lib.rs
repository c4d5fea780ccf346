//! Axum HTTP server exposing the media functions.
//!
//! This crate provides:
//! - Title/hashtag generation for remote videos (Twelve Labs)
//! - Image-to-video generation (Runway)
//! - Health, readiness and Prometheus endpoints
//! - Request logging, security headers and per-IP rate limiting

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod security;
pub mod services;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
