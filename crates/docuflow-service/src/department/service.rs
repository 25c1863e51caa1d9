//! Department CRUD and director assignment.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use docuflow_core::error::AppError;
use docuflow_core::types::pagination::{PageRequest, PageResponse};
use docuflow_database::repositories::audit::AuditLogRepository;
use docuflow_database::repositories::department::DepartmentRepository;
use docuflow_database::repositories::user::UserRepository;
use docuflow_entity::audit::model::CreateAuditLogEntry;
use docuflow_entity::department::model::{CreateDepartment, Department, UpdateDepartment};
use docuflow_entity::user::{User, UserRole};

use crate::context::RequestContext;

/// Manages departments and their director assignments.
#[derive(Debug, Clone)]
pub struct DepartmentService {
    /// Department repository.
    department_repo: Arc<DepartmentRepository>,
    /// User repository (director lookups).
    user_repo: Arc<UserRepository>,
    /// Audit log repository.
    audit_repo: Arc<AuditLogRepository>,
}

impl DepartmentService {
    /// Creates a new department service.
    pub fn new(
        department_repo: Arc<DepartmentRepository>,
        user_repo: Arc<UserRepository>,
        audit_repo: Arc<AuditLogRepository>,
    ) -> Self {
        Self {
            department_repo,
            user_repo,
            audit_repo,
        }
    }

    /// Lists departments.
    pub async fn list_departments(
        &self,
        page: PageRequest,
    ) -> Result<PageResponse<Department>, AppError> {
        self.department_repo.find_all(&page).await
    }

    /// Fetches a single department.
    pub async fn get_department(&self, id: Uuid) -> Result<Department, AppError> {
        self.department_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Department not found"))
    }

    /// Creates a new department. Codes must be unique.
    pub async fn create_department(
        &self,
        ctx: &RequestContext,
        req: CreateDepartment,
    ) -> Result<Department, AppError> {
        if req.name.trim().is_empty() {
            return Err(AppError::validation("Department name is required"));
        }
        if req.code.trim().is_empty() {
            return Err(AppError::validation("Department code is required"));
        }

        if self
            .department_repo
            .find_by_code(&req.code)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                "A department with this code already exists",
            ));
        }

        let department = self.department_repo.create(&req).await?;
        self.audit(ctx, "department.create", department.id).await;
        info!(department_id = %department.id, code = %department.code, "Department created");
        Ok(department)
    }

    /// Updates a department's fields.
    pub async fn update_department(
        &self,
        ctx: &RequestContext,
        update: UpdateDepartment,
    ) -> Result<Department, AppError> {
        if let Some(ref code) = update.code {
            if let Some(existing) = self.department_repo.find_by_code(code).await? {
                if existing.id != update.id {
                    return Err(AppError::conflict(
                        "A department with this code already exists",
                    ));
                }
            }
        }

        let department = self
            .department_repo
            .update(&update)
            .await?
            .ok_or_else(|| AppError::not_found("Department not found"))?;

        self.audit(ctx, "department.update", department.id).await;
        Ok(department)
    }

    /// Deletes a department. Departments with members cannot be removed.
    pub async fn delete_department(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<(), AppError> {
        let members = self
            .user_repo
            .find_by_department(id, &PageRequest::new(1, 1))
            .await?;
        if members.total_items > 0 {
            return Err(AppError::conflict(
                "Department still has members; reassign them first",
            ));
        }

        if !self.department_repo.delete(id).await? {
            return Err(AppError::not_found("Department not found"));
        }

        self.audit(ctx, "department.delete", id).await;
        info!(department_id = %id, "Department deleted");
        Ok(())
    }

    /// Lists directors with no department — the only candidates the
    /// assignment dialog may offer.
    pub async fn unassigned_directors(&self) -> Result<Vec<User>, AppError> {
        self.user_repo.find_unassigned_directors().await
    }

    /// Assigns a director to a department.
    ///
    /// The candidate must hold the director role and must not already be
    /// assigned elsewhere (one department per director).
    pub async fn assign_director(
        &self,
        ctx: &RequestContext,
        department_id: Uuid,
        director_id: Uuid,
    ) -> Result<Department, AppError> {
        let director = self
            .user_repo
            .find_by_id(director_id)
            .await?
            .ok_or_else(|| AppError::not_found("Director not found"))?;

        if director.role != UserRole::Director {
            return Err(AppError::validation("Selected user is not a director"));
        }

        if let Some(existing) = self.department_repo.find_by_director(director_id).await? {
            if existing.id != department_id {
                return Err(AppError::conflict(format!(
                    "{} already directs the {} department",
                    director.full_name(),
                    existing.name
                )));
            }
        }

        let department = self
            .department_repo
            .set_director(department_id, Some(director_id))
            .await?
            .ok_or_else(|| AppError::not_found("Department not found"))?;

        self.audit(ctx, "department.assign_director", department_id)
            .await;
        info!(
            department_id = %department_id,
            director_id = %director_id,
            "Director assigned"
        );
        Ok(department)
    }

    /// Clears a department's director assignment.
    pub async fn unassign_director(
        &self,
        ctx: &RequestContext,
        department_id: Uuid,
    ) -> Result<Department, AppError> {
        let department = self
            .department_repo
            .set_director(department_id, None)
            .await?
            .ok_or_else(|| AppError::not_found("Department not found"))?;

        self.audit(ctx, "department.unassign_director", department_id)
            .await;
        Ok(department)
    }

    /// Best-effort audit write; failures are logged, never surfaced.
    async fn audit(&self, ctx: &RequestContext, action: &str, target_id: Uuid) {
        let entry = CreateAuditLogEntry {
            actor_id: ctx.user_id,
            action: action.to_string(),
            target_type: "department".to_string(),
            target_id: Some(target_id),
            details: None,
            ip_address: Some(ctx.ip_address.clone()),
        };
        if let Err(e) = self.audit_repo.create(&entry).await {
            tracing::error!(error = %e, action = %action, "Failed to write audit entry");
        }
    }
}
