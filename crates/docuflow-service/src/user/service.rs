//! User CRUD service for admin operations and self-service profile reads.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use docuflow_auth::password::{PasswordHasher, PasswordValidator};
use docuflow_core::error::AppError;
use docuflow_core::types::pagination::{PageRequest, PageResponse};
use docuflow_database::repositories::audit::AuditLogRepository;
use docuflow_database::repositories::user::UserRepository;
use docuflow_entity::audit::model::CreateAuditLogEntry;
use docuflow_entity::user::model::{CreateUser, UpdateUser};
use docuflow_entity::user::signature::SignatureKind;
use docuflow_entity::user::{User, UserRole};

use crate::context::RequestContext;

/// Request to create a new user, as received from the admin surface.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateUserRequest {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address (login key).
    pub email: String,
    /// Plaintext password to hash.
    pub password: String,
    /// Assigned role.
    pub role: UserRole,
    /// Department reference.
    pub department_id: Option<Uuid>,
    /// Job position.
    pub position: Option<String>,
}

/// Manages user accounts.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Audit log repository.
    audit_repo: Arc<AuditLogRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy validator.
    password_validator: Arc<PasswordValidator>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        audit_repo: Arc<AuditLogRepository>,
        hasher: Arc<PasswordHasher>,
        password_validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            user_repo,
            audit_repo,
            hasher,
            password_validator,
        }
    }

    /// Lists users (admin only at the route layer).
    pub async fn list_users(&self, page: PageRequest) -> Result<PageResponse<User>, AppError> {
        self.user_repo.find_all(&page).await
    }

    /// Fetches a single user.
    pub async fn get_user(&self, id: Uuid) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Creates a new user account.
    ///
    /// Directors and department users must carry a department reference;
    /// the check fails before any database write.
    pub async fn create_user(
        &self,
        ctx: &RequestContext,
        req: CreateUserRequest,
    ) -> Result<User, AppError> {
        if req.first_name.trim().is_empty() || req.last_name.trim().is_empty() {
            return Err(AppError::validation("First and last name are required"));
        }

        if req.role.requires_department() && req.department_id.is_none() {
            return Err(AppError::validation(format!(
                "A department is required for the {} role",
                req.role
            )));
        }

        self.password_validator.validate(&req.password)?;

        if self.user_repo.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::conflict("A user with this email already exists"));
        }

        let password_hash = self.hasher.hash_password(&req.password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                first_name: req.first_name,
                last_name: req.last_name,
                email: req.email,
                password_hash,
                role: req.role,
                department_id: req.department_id,
                position: req.position,
                created_by: Some(ctx.user_id),
            })
            .await?;

        self.audit(ctx, "user.create", user.id).await;
        info!(user_id = %user.id, role = %user.role, "User created");
        Ok(user)
    }

    /// Updates a user's profile fields.
    pub async fn update_user(
        &self,
        ctx: &RequestContext,
        update: UpdateUser,
    ) -> Result<User, AppError> {
        let user = self
            .user_repo
            .update(&update)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        self.audit(ctx, "user.update", user.id).await;
        Ok(user)
    }

    /// Resets a user's password to a new admin-supplied value.
    pub async fn reset_password(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        new_password: &str,
        confirmation: &str,
    ) -> Result<(), AppError> {
        self.password_validator
            .validate_confirmation(new_password, confirmation)?;
        self.password_validator.validate(new_password)?;

        // Ensure the target exists before touching the hash.
        self.get_user(user_id).await?;

        let password_hash = self.hasher.hash_password(new_password)?;
        self.user_repo.update_password(user_id, &password_hash).await?;

        self.audit(ctx, "user.reset_password", user_id).await;
        info!(user_id = %user_id, "Password reset");
        Ok(())
    }

    /// Activates or deactivates an account.
    pub async fn set_active(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        is_active: bool,
    ) -> Result<User, AppError> {
        let user = self
            .user_repo
            .update_active(user_id, is_active)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let action = if is_active {
            "user.activate"
        } else {
            "user.deactivate"
        };
        self.audit(ctx, action, user_id).await;
        Ok(user)
    }

    /// Stores or replaces the caller's signature.
    pub async fn save_signature(
        &self,
        ctx: &RequestContext,
        kind: SignatureKind,
        data: &str,
    ) -> Result<(), AppError> {
        if data.trim().is_empty() {
            return Err(AppError::validation("Signature data is required"));
        }
        self.user_repo
            .update_signature(ctx.user_id, true, kind, data)
            .await?;
        self.audit(ctx, "user.save_signature", ctx.user_id).await;
        Ok(())
    }

    /// Deletes a user account.
    pub async fn delete_user(&self, ctx: &RequestContext, user_id: Uuid) -> Result<(), AppError> {
        if user_id == ctx.user_id {
            return Err(AppError::validation("You cannot delete your own account"));
        }

        if !self.user_repo.delete(user_id).await? {
            return Err(AppError::not_found("User not found"));
        }

        self.audit(ctx, "user.delete", user_id).await;
        info!(user_id = %user_id, "User deleted");
        Ok(())
    }

    /// Best-effort audit write; failures are logged, never surfaced.
    async fn audit(&self, ctx: &RequestContext, action: &str, target_id: Uuid) {
        let entry = CreateAuditLogEntry {
            actor_id: ctx.user_id,
            action: action.to_string(),
            target_type: "user".to_string(),
            target_id: Some(target_id),
            details: None,
            ip_address: Some(ctx.ip_address.clone()),
        };
        if let Err(e) = self.audit_repo.create(&entry).await {
            tracing::error!(error = %e, action = %action, "Failed to write audit entry");
        }
    }
}
