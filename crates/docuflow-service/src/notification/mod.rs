//! Notification delivery and preferences.

pub mod rules;
pub mod service;

pub use service::NotificationService;
