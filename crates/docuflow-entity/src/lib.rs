//! # docuflow-entity
//!
//! Domain entity models for DocuFlow. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.
//!
//! The file and request status enums carry the approval-workflow state
//! machine: every permitted transition is encoded here and nowhere else.

pub mod audit;
pub mod department;
pub mod file;
pub mod notification;
pub mod request;
pub mod session;
pub mod user;
