//! Approval request service — creation, inbox, and comment-gated actions.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use docuflow_core::error::AppError;
use docuflow_core::events::{DomainEvent, EventPayload, RequestEvent};
use docuflow_core::types::pagination::{PageRequest, PageResponse};
use docuflow_database::repositories::audit::AuditLogRepository;
use docuflow_database::repositories::department::DepartmentRepository;
use docuflow_database::repositories::request::RequestRepository;
use docuflow_database::repositories::user::UserRepository;
use docuflow_entity::audit::model::CreateAuditLogEntry;
use docuflow_entity::request::action::RequestAction;
use docuflow_entity::request::model::{ApprovalRequest, CreateApprovalRequest};
use docuflow_entity::user::UserRole;

use crate::context::RequestContext;
use crate::notification::NotificationService;

/// Manages approval requests and the pending inbox.
#[derive(Debug, Clone)]
pub struct RequestService {
    /// Request repository.
    request_repo: Arc<RequestRepository>,
    /// Department repository.
    department_repo: Arc<DepartmentRepository>,
    /// User repository (scope resolution).
    user_repo: Arc<UserRepository>,
    /// Audit log repository.
    audit_repo: Arc<AuditLogRepository>,
    /// Notification delivery.
    notifications: Arc<NotificationService>,
}

impl RequestService {
    /// Creates a new request service.
    pub fn new(
        request_repo: Arc<RequestRepository>,
        department_repo: Arc<DepartmentRepository>,
        user_repo: Arc<UserRepository>,
        audit_repo: Arc<AuditLogRepository>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            request_repo,
            department_repo,
            user_repo,
            audit_repo,
            notifications,
        }
    }

    /// Lists requests created by the caller.
    pub async fn list_mine(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<ApprovalRequest>, AppError> {
        self.request_repo.find_by_creator(ctx.user_id, &page).await
    }

    /// Fetches a single request.
    pub async fn get_request(&self, id: Uuid) -> Result<ApprovalRequest, AppError> {
        self.request_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Request not found"))
    }

    /// Creates a new pending request targeting a department.
    pub async fn create_request(
        &self,
        ctx: &RequestContext,
        mut req: CreateApprovalRequest,
    ) -> Result<ApprovalRequest, AppError> {
        if req.title.trim().is_empty() {
            return Err(AppError::validation("Title is required"));
        }

        let department = self
            .department_repo
            .find_by_id(req.target_department_id)
            .await?
            .ok_or_else(|| AppError::not_found("Target department not found"))?;

        if !department.is_active {
            return Err(AppError::validation(
                "Target department is not accepting requests",
            ));
        }

        // An unspecified director defaults to the department's assigned one.
        if req.assigned_director_id.is_none() {
            req.assigned_director_id = department.director_id;
        }

        req.created_by = ctx.user_id;
        let request = self.request_repo.create(&req).await?;

        self.notifications
            .publish(&DomainEvent::new(
                Some(ctx.user_id),
                EventPayload::Request(RequestEvent::Submitted {
                    request_id: request.id,
                    title: request.title.clone(),
                    target_department_id: request.target_department_id,
                    assigned_director_id: request.assigned_director_id,
                }),
            ))
            .await;

        self.audit(ctx, "request.create", request.id).await;
        info!(request_id = %request.id, "Request submitted");
        Ok(request)
    }

    /// Lists the caller's pending inbox.
    ///
    /// Directors see their department's requests (assigned to them or
    /// unassigned); department users see their department's inbox. Items
    /// keep fetch order; acting on one only removes that item.
    pub async fn inbox(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<ApprovalRequest>, AppError> {
        let department_id = self.resolve_department(ctx).await?;
        let assigned_filter = if ctx.role == UserRole::Director {
            Some(ctx.user_id)
        } else {
            None
        };
        self.request_repo
            .find_inbox(department_id, assigned_filter, &page)
            .await
    }

    /// Takes an action on a pending request.
    ///
    /// The comment rule is enforced before any write: reject, send-back,
    /// and signature requests need a non-empty comment; approve does not.
    pub async fn act(
        &self,
        ctx: &RequestContext,
        request_id: Uuid,
        action: RequestAction,
        comment: Option<&str>,
    ) -> Result<ApprovalRequest, AppError> {
        action.validate_comment(comment)?;

        let request = self.get_request(request_id).await?;

        if !request.in_inbox() {
            return Err(AppError::conflict(format!(
                "Request is {} and cannot be acted on",
                request.status
            )));
        }

        // Only the target department's members (or an admin) may act.
        if !ctx.is_admin() {
            let department_id = self.resolve_department(ctx).await?;
            if department_id != request.target_department_id {
                return Err(AppError::authorization(
                    "This request belongs to another department's inbox",
                ));
            }
        }

        let status = action.resulting_status();
        let trimmed = comment.map(str::trim).filter(|c| !c.is_empty());
        let updated = self
            .request_repo
            .apply_action(request_id, status, trimmed, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::conflict("Request was already acted on"))?;

        self.notifications
            .publish(&DomainEvent::new(
                Some(ctx.user_id),
                EventPayload::Request(RequestEvent::Actioned {
                    request_id: updated.id,
                    title: updated.title.clone(),
                    action: action.to_string(),
                    status: status.to_string(),
                    creator_id: updated.created_by,
                    comment: trimmed.map(String::from),
                }),
            ))
            .await;

        self.audit(ctx, &format!("request.{action}"), request_id).await;
        info!(request_id = %request_id, action = %action, "Request action recorded");
        Ok(updated)
    }

    /// Resolve the caller's department scope.
    ///
    /// Directors resolve through their department assignment; department
    /// users through their own department reference.
    async fn resolve_department(&self, ctx: &RequestContext) -> Result<Uuid, AppError> {
        if ctx.role == UserRole::Director {
            if let Some(department) = self.department_repo.find_by_director(ctx.user_id).await? {
                return Ok(department.id);
            }
        }

        let user = self
            .user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::authentication("User not found"))?;

        user.department_id
            .ok_or_else(|| AppError::authorization("You are not assigned to a department"))
    }

    /// Best-effort audit write; failures are logged, never surfaced.
    async fn audit(&self, ctx: &RequestContext, action: &str, target_id: Uuid) {
        let entry = CreateAuditLogEntry {
            actor_id: ctx.user_id,
            action: action.to_string(),
            target_type: "request".to_string(),
            target_id: Some(target_id),
            details: None,
            ip_address: Some(ctx.ip_address.clone()),
        };
        if let Err(e) = self.audit_repo.create(&entry).await {
            tracing::error!(error = %e, action = %action, "Failed to write audit entry");
        }
    }
}
