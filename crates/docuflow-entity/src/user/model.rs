//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;
use super::signature::{SignatureKind, UserSignature};

/// A registered user in the DocuFlow system.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// First (given) name.
    pub first_name: String,
    /// Last (family) name.
    pub last_name: String,
    /// Email address — the login key, unique.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// User role.
    pub role: UserRole,
    /// The department this user belongs to. Absent for admins.
    pub department_id: Option<Uuid>,
    /// Job position / title.
    pub position: Option<String>,
    /// Whether the account is active (deactivated accounts cannot log in).
    pub is_active: bool,
    /// Whether a signature is stored and enabled.
    pub signature_enabled: bool,
    /// How the stored signature was captured.
    pub signature_kind: Option<SignatureKind>,
    /// Encoded signature payload (data URL).
    #[serde(skip_serializing)]
    pub signature_data: Option<String>,
    /// When the signature was last updated.
    pub signature_updated_at: Option<DateTime<Utc>>,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
    /// The admin who created this user.
    pub created_by: Option<Uuid>,
}

impl User {
    /// The user's full display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Check if the user can log in right now.
    pub fn can_login(&self) -> bool {
        self.is_active
    }

    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Whether this user holds a usable signature.
    pub fn has_signature(&self) -> bool {
        self.signature_enabled && self.signature_data.is_some()
    }

    /// Return the stored signature as a value object, if present.
    pub fn signature(&self) -> Option<UserSignature> {
        match (&self.signature_kind, &self.signature_data) {
            (Some(kind), Some(data)) => Some(UserSignature {
                enabled: self.signature_enabled,
                kind: *kind,
                data: data.clone(),
                updated_at: self.signature_updated_at.unwrap_or(self.updated_at),
            }),
            _ => None,
        }
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: UserRole,
    /// Department reference (required for directors and department users).
    pub department_id: Option<Uuid>,
    /// Job position.
    pub position: Option<String>,
    /// Creating admin's user ID.
    pub created_by: Option<Uuid>,
}

/// Data for updating an existing user's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUser {
    /// The user ID to update.
    pub id: Uuid,
    /// New first name.
    pub first_name: Option<String>,
    /// New last name.
    pub last_name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New role.
    pub role: Option<UserRole>,
    /// New department reference.
    pub department_id: Option<Option<Uuid>>,
    /// New position.
    pub position: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            first_name: "Ama".to_string(),
            last_name: "Mensah".to_string(),
            email: "ama@example.com".to_string(),
            password_hash: "x".to_string(),
            role: UserRole::Department,
            department_id: Some(Uuid::new_v4()),
            position: Some("Officer".to_string()),
            is_active: true,
            signature_enabled: false,
            signature_kind: None,
            signature_data: None,
            signature_updated_at: None,
            last_login_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            created_by: None,
        }
    }

    #[test]
    fn test_full_name() {
        assert_eq!(sample_user().full_name(), "Ama Mensah");
    }

    #[test]
    fn test_deactivated_cannot_login() {
        let mut user = sample_user();
        user.is_active = false;
        assert!(!user.can_login());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert!(json.get("password_hash").is_none());
    }
}
