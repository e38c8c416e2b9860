//! # wardlink-api
//!
//! HTTP API layer for WardLink built on Axum.
//!
//! Provides the REST endpoints for the link-request workflow and the
//! notification dashboard, the WebSocket upgrade for real-time delivery,
//! the bearer-token extractor, DTOs, and error mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
