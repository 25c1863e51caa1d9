//! Request DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use docuflow_entity::file::share::{SharePermission, ShareTarget};
use docuflow_entity::request::action::RequestAction;
use docuflow_entity::request::model::RequestAttachment;
use docuflow_entity::request::priority::RequestPriority;
use docuflow_entity::user::UserRole;
use docuflow_entity::user::signature::SignatureKind;
use docuflow_service::file::FileDecision;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    #[validate(email)]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1))]
    pub password: String,
}

/// Refresh token request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// The refresh token issued at login.
    pub refresh_token: String,
}

/// Admin user creation body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserBody {
    /// First name.
    #[validate(length(min = 1))]
    pub first_name: String,
    /// Last name.
    #[validate(length(min = 1))]
    pub last_name: String,
    /// Email.
    #[validate(email)]
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Role.
    pub role: UserRole,
    /// Department reference.
    pub department_id: Option<Uuid>,
    /// Job position.
    pub position: Option<String>,
}

/// Admin user update body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserBody {
    /// New first name.
    pub first_name: Option<String>,
    /// New last name.
    pub last_name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New role.
    pub role: Option<UserRole>,
    /// New department. A missing field keeps the current value; an
    /// explicit `null` clears the assignment.
    #[serde(default, deserialize_with = "double_option")]
    pub department_id: Option<Option<Uuid>>,
    /// New position.
    pub position: Option<String>,
}

/// Admin password reset body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordBody {
    /// New password.
    pub password: String,
    /// Confirmation, must match.
    pub confirm_password: String,
}

/// Account activation toggle body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetActiveBody {
    /// Desired active state.
    pub is_active: bool,
}

/// Signature upload body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveSignatureBody {
    /// Capture method.
    pub kind: SignatureKind,
    /// Encoded signature payload.
    pub data: String,
}

/// Department creation body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDepartmentBody {
    /// Name.
    #[validate(length(min = 1))]
    pub name: String,
    /// Short unique code.
    #[validate(length(min = 1, max = 10))]
    pub code: String,
    /// Description.
    pub description: Option<String>,
}

/// Department update body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDepartmentBody {
    /// New name.
    pub name: Option<String>,
    /// New code.
    pub code: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
}

/// Director assignment body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignDirectorBody {
    /// The director to assign; `null` clears the assignment.
    pub director_id: Option<Uuid>,
}

/// File creation body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFileBody {
    /// Title.
    #[validate(length(min = 1))]
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Category.
    pub category: Option<String>,
    /// Attachment file name.
    pub attachment_name: Option<String>,
    /// Attachment URL.
    pub attachment_url: Option<String>,
    /// Attachment size in bytes.
    pub attachment_size: Option<i64>,
    /// Whether final approval requires a signature.
    #[serde(default)]
    pub requires_signature: bool,
}

/// File share body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareFilesBody {
    /// Files to share.
    pub file_ids: Vec<Uuid>,
    /// Targets to share with.
    pub targets: Vec<ShareTarget>,
    /// Granted permission (defaults to view).
    #[serde(default = "default_permission")]
    pub permission: SharePermission,
}

/// File decision body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileDecisionBody {
    /// The decision to apply.
    pub decision: FileDecision,
    /// Optional comment recorded with the decision.
    pub comment: Option<String>,
}

/// Request creation body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRequestBody {
    /// Title.
    #[validate(length(min = 1))]
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Target department.
    pub target_department_id: Uuid,
    /// Assigned director (defaults to the department's director).
    pub assigned_director_id: Option<Uuid>,
    /// Priority (defaults to medium).
    #[serde(default)]
    pub priority: RequestPriority,
    /// Category.
    pub category: Option<String>,
    /// Attachment metadata.
    #[serde(default)]
    pub attachments: Vec<RequestAttachment>,
}

/// Request action body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestActionBody {
    /// The action to take.
    pub action: RequestAction,
    /// Comment — required for every action except approve.
    pub comment: Option<String>,
}

/// Notification preferences body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavePreferencesBody {
    /// Per-category preference object.
    pub preferences: serde_json::Value,
}

/// Report query parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportQuery {
    /// Period start.
    pub from: Option<chrono::DateTime<chrono::Utc>>,
    /// Period end.
    pub to: Option<chrono::DateTime<chrono::Utc>>,
}

fn default_permission() -> SharePermission {
    SharePermission::View
}

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`) during deserialization.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_field_absent_vs_null() {
        let absent: UpdateUserBody = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(absent.department_id, None);

        let null: UpdateUserBody = serde_json::from_str(r#"{"department_id": null}"#).unwrap();
        assert_eq!(null.department_id, Some(None));

        let id = Uuid::new_v4();
        let set: UpdateUserBody =
            serde_json::from_str(&format!(r#"{{"department_id": "{id}"}}"#)).unwrap();
        assert_eq!(set.department_id, Some(Some(id)));
    }
}
