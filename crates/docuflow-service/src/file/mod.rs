//! Document file workflow service.

pub mod service;

pub use service::{FileDecision, FileService, ShareFilesRequest};
