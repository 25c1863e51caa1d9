//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Category of a notification, used for preference filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationCategory {
    /// File workflow notifications (shared, approved, rejected, sent back).
    File,
    /// Approval-request notifications.
    Request,
    /// Session and account notifications.
    Session,
    /// System announcements.
    System,
}

impl NotificationCategory {
    /// Return the category as a lowercase string (preference JSON key).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Request => "request",
            Self::Session => "session",
            Self::System => "system",
        }
    }
}

/// A notification delivered to one user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// The recipient.
    pub user_id: Uuid,
    /// Notification category.
    pub category: NotificationCategory,
    /// Short title.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Whether the recipient has read it.
    pub is_read: bool,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNotification {
    /// The recipient.
    pub user_id: Uuid,
    /// Category.
    pub category: NotificationCategory,
    /// Title.
    pub title: String,
    /// Body text.
    pub body: String,
}
