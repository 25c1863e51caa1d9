//! # docuflow-api
//!
//! HTTP API layer for DocuFlow built on Axum.
//!
//! Provides all REST endpoints, middleware (auth, role gating, route
//! gating, CORS, logging), extractors, DTOs, and error mapping. Every
//! response — success or failure — uses the
//! `{success, data?, error?, message?}` envelope.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
