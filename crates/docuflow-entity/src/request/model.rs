//! Approval request entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::priority::RequestPriority;
use super::status::RequestStatus;

/// A request submitted by a department user for approval.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApprovalRequest {
    /// Unique request identifier.
    pub id: Uuid,
    /// Request title.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// The department whose inbox receives the request.
    pub target_department_id: Uuid,
    /// The director the request was assigned to, if any.
    pub assigned_director_id: Option<Uuid>,
    /// Priority level.
    pub priority: RequestPriority,
    /// Request category.
    pub category: Option<String>,
    /// Current status.
    pub status: RequestStatus,
    /// The user who created the request.
    pub created_by: Uuid,
    /// Attachment metadata as a JSON array of `{name, size, content_type}`.
    pub attachments: serde_json::Value,
    /// Comment recorded with the most recent action.
    pub action_comment: Option<String>,
    /// The user who took the most recent action.
    pub acted_by: Option<Uuid>,
    /// When the most recent action was taken.
    pub acted_at: Option<DateTime<Utc>>,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
    /// When the request was last updated.
    pub updated_at: DateTime<Utc>,
}

impl ApprovalRequest {
    /// Whether the request is still in the target department's inbox.
    pub fn in_inbox(&self) -> bool {
        self.status.is_pending()
    }

    /// Parse the attachment metadata list.
    pub fn attachment_list(&self) -> Vec<RequestAttachment> {
        serde_json::from_value(self.attachments.clone()).unwrap_or_default()
    }
}

/// Metadata describing one attachment on a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestAttachment {
    /// File name.
    pub name: String,
    /// Size in bytes.
    pub size: i64,
    /// MIME content type.
    pub content_type: Option<String>,
}

/// Data required to create a new approval request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateApprovalRequest {
    /// Request title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Target department.
    pub target_department_id: Uuid,
    /// Assigned director, if chosen at creation time.
    pub assigned_director_id: Option<Uuid>,
    /// Priority level.
    pub priority: RequestPriority,
    /// Category.
    pub category: Option<String>,
    /// The creating user.
    pub created_by: Uuid,
    /// Attachment metadata.
    pub attachments: Vec<RequestAttachment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_round_trip() {
        let attachments = vec![RequestAttachment {
            name: "budget.xlsx".to_string(),
            size: 20_480,
            content_type: Some("application/vnd.ms-excel".to_string()),
        }];
        let value = serde_json::to_value(&attachments).unwrap();
        let request = ApprovalRequest {
            id: Uuid::new_v4(),
            title: "Q3 budget".to_string(),
            description: None,
            target_department_id: Uuid::new_v4(),
            assigned_director_id: None,
            priority: RequestPriority::High,
            category: None,
            status: RequestStatus::Pending,
            created_by: Uuid::new_v4(),
            attachments: value,
            action_comment: None,
            acted_by: None,
            acted_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(request.attachment_list(), attachments);
        assert!(request.in_inbox());
    }
}
