//! Reporting service.

pub mod summary;

pub use summary::{ReportService, SummaryReport};
