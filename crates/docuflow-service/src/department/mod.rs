//! Department management service.

pub mod service;

pub use service::DepartmentService;
