//! # docuflow-core
//!
//! Core crate for DocuFlow. Contains configuration schemas, domain events,
//! pagination and response envelope types, formatting helpers, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other DocuFlow crates.

pub mod config;
pub mod error;
pub mod events;
pub mod format;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
