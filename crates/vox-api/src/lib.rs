//! Axum HTTP API for the Vox clip supplier.
//!
//! This crate provides:
//! - Random clip, clip URL, and avatar clip URL endpoints
//! - Liveness and readiness probes
//! - Prometheus metrics

pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use client::ClientId;
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
