//! Document file entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::FileStatus;

/// A document file tracked by the approval workflow.
///
/// The binary attachment itself lives behind `attachment_url`; this row
/// holds the workflow state and metadata.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DocumentFile {
    /// Unique file identifier.
    pub id: Uuid,
    /// Document title.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Document category (e.g. `"memo"`, `"policy"`).
    pub category: Option<String>,
    /// Current workflow status.
    pub status: FileStatus,
    /// The user who created the file.
    pub created_by: Uuid,
    /// Attachment file name.
    pub attachment_name: Option<String>,
    /// Attachment URL.
    pub attachment_url: Option<String>,
    /// Attachment size in bytes.
    pub attachment_size: Option<i64>,
    /// Whether final approval requires a signature.
    pub requires_signature: bool,
    /// When the file was created.
    pub created_at: DateTime<Utc>,
    /// When the file was last updated.
    pub updated_at: DateTime<Utc>,
}

impl DocumentFile {
    /// Whether this file may currently be shared.
    pub fn can_share(&self) -> bool {
        self.status.can_share()
    }

    /// Whether an approval decision can currently be taken on this file.
    pub fn is_actionable(&self) -> bool {
        self.status.is_actionable()
    }
}

/// Data required to create a new document file (always a draft).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDocumentFile {
    /// Document title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Category.
    pub category: Option<String>,
    /// The creating user.
    pub created_by: Uuid,
    /// Attachment file name.
    pub attachment_name: Option<String>,
    /// Attachment URL.
    pub attachment_url: Option<String>,
    /// Attachment size in bytes.
    pub attachment_size: Option<i64>,
    /// Whether final approval requires a signature.
    pub requires_signature: bool,
}
