//! File share entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Permission level granted by a share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "share_permission", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SharePermission {
    /// Read-only access.
    View,
    /// Read and annotate/edit access.
    Edit,
}

/// The recipient of a share — a single user or a whole department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ShareTarget {
    /// Shared with one user.
    User(Uuid),
    /// Shared with every member of a department.
    Department(Uuid),
}

/// A share entry granting a target access to a file.
///
/// Stored with the target flattened into two nullable columns; exactly one
/// of `user_id` / `department_id` is set per row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FileShare {
    /// Unique share identifier.
    pub id: Uuid,
    /// The shared file.
    pub file_id: Uuid,
    /// Target user (exclusive with `department_id`).
    pub user_id: Option<Uuid>,
    /// Target department (exclusive with `user_id`).
    pub department_id: Option<Uuid>,
    /// Permission level granted.
    pub permission: SharePermission,
    /// The user who created the share.
    pub shared_by: Uuid,
    /// When the share was created.
    pub shared_at: DateTime<Utc>,
}

impl FileShare {
    /// Return the share target as a tagged value.
    pub fn target(&self) -> Option<ShareTarget> {
        match (self.user_id, self.department_id) {
            (Some(user_id), None) => Some(ShareTarget::User(user_id)),
            (None, Some(department_id)) => Some(ShareTarget::Department(department_id)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_resolution() {
        let dept = Uuid::new_v4();
        let share = FileShare {
            id: Uuid::new_v4(),
            file_id: Uuid::new_v4(),
            user_id: None,
            department_id: Some(dept),
            permission: SharePermission::View,
            shared_by: Uuid::new_v4(),
            shared_at: Utc::now(),
        };
        assert_eq!(share.target(), Some(ShareTarget::Department(dept)));
    }

    #[test]
    fn test_malformed_row_has_no_target() {
        let share = FileShare {
            id: Uuid::new_v4(),
            file_id: Uuid::new_v4(),
            user_id: None,
            department_id: None,
            permission: SharePermission::View,
            shared_by: Uuid::new_v4(),
            shared_at: Utc::now(),
        };
        assert_eq!(share.target(), None);
    }
}
