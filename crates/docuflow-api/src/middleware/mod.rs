//! Axum middleware stack.

pub mod cors;
pub mod gate;
pub mod logging;
pub mod rbac;
