//! Notification domain entities.

pub mod model;
pub mod preference;

pub use model::{CreateNotification, Notification, NotificationCategory};
pub use preference::{CategoryPreference, NotificationPreference};
