//! # Sunlog REST
//!
//! Axum-based REST surface for Sunlog: controllers per entity, a counter
//! endpoint, health endpoints, and Swagger UI.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
