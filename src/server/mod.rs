//! Axum-based HTTP server for the adlens analysis service.
//!
//! This module sets up the HTTP server, configures routes, and handles
//! incoming analysis requests, dispatching each to the requested
//! inference provider.
//!
//! # Components
//!
//! - `handlers`: Implementation of individual endpoints (analyze, health, metrics, preflight).
//! - `middleware`: Request ID tracking and the fixed CORS response headers.
//! - `routes`: The main router configuration that ties everything together.

mod handlers;
mod middleware;
mod routes;

pub use routes::{create_router, AppState};
