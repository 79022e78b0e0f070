//! Axum HTTP API server for video package generation.
//!
//! This crate provides:
//! - A progress-streaming generation endpoint (server-sent events)
//! - Script and image synthesis with placeholder fallbacks
//! - A bounded in-memory history of generated videos
//! - Prometheus metrics and structured run logging

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod pipeline;
pub mod routes;
pub mod state;
pub mod store;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use pipeline::{Pipeline, PipelineError};
pub use routes::create_router;
pub use state::AppState;
pub use store::ResultStore;
