//! Document file service — draft creation, sharing, and status decisions.
//!
//! Share and decision preconditions are checked before any write, so a
//! validation failure never leaves partial state behind.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use docuflow_core::error::AppError;
use docuflow_core::events::{DomainEvent, EventPayload, FileEvent};
use docuflow_core::types::pagination::{PageRequest, PageResponse};
use docuflow_database::repositories::audit::AuditLogRepository;
use docuflow_database::repositories::file::FileRepository;
use docuflow_database::repositories::user::UserRepository;
use docuflow_entity::audit::model::CreateAuditLogEntry;
use docuflow_entity::file::model::{CreateDocumentFile, DocumentFile};
use docuflow_entity::file::share::{FileShare, SharePermission, ShareTarget};
use docuflow_entity::file::status::FileStatus;

use crate::context::RequestContext;
use crate::notification::NotificationService;

/// Request to share a batch of draft files with a set of targets.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ShareFilesRequest {
    /// The files to share. Must be non-empty.
    pub file_ids: Vec<Uuid>,
    /// The users and departments to share with. Must be non-empty.
    pub targets: Vec<ShareTarget>,
    /// Permission granted to every target.
    pub permission: SharePermission,
}

/// A decision taken on a pending file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileDecision {
    /// Approve the file.
    Approve,
    /// Reject the file.
    Reject,
    /// Return the file to its creator for revision.
    SendBack,
}

impl FileDecision {
    /// The status a pending file moves to under this decision.
    pub fn resulting_status(&self) -> FileStatus {
        match self {
            Self::Approve => FileStatus::Approved,
            Self::Reject => FileStatus::Rejected,
            Self::SendBack => FileStatus::SentBack,
        }
    }
}

/// Manages document files through the approval workflow.
#[derive(Debug, Clone)]
pub struct FileService {
    /// File repository.
    file_repo: Arc<FileRepository>,
    /// User repository (signature checks, department scope).
    user_repo: Arc<UserRepository>,
    /// Audit log repository.
    audit_repo: Arc<AuditLogRepository>,
    /// Notification delivery.
    notifications: Arc<NotificationService>,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        file_repo: Arc<FileRepository>,
        user_repo: Arc<UserRepository>,
        audit_repo: Arc<AuditLogRepository>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            file_repo,
            user_repo,
            audit_repo,
            notifications,
        }
    }

    /// Lists the caller's own files.
    pub async fn list_mine(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<DocumentFile>, AppError> {
        self.file_repo.find_by_creator(ctx.user_id, &page).await
    }

    /// Lists pending files shared into the caller's department.
    pub async fn list_pending_for_department(
        &self,
        department_id: Uuid,
        page: PageRequest,
    ) -> Result<PageResponse<DocumentFile>, AppError> {
        self.file_repo
            .find_pending_for_department(department_id, &page)
            .await
    }

    /// Fetches a file with its share entries.
    pub async fn get_file(&self, id: Uuid) -> Result<(DocumentFile, Vec<FileShare>), AppError> {
        let file = self
            .file_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;
        let shares = self.file_repo.find_shares(id).await?;
        Ok((file, shares))
    }

    /// Creates a new draft file owned by the caller.
    pub async fn create_draft(
        &self,
        ctx: &RequestContext,
        mut req: CreateDocumentFile,
    ) -> Result<DocumentFile, AppError> {
        if req.title.trim().is_empty() {
            return Err(AppError::validation("Title is required"));
        }

        req.created_by = ctx.user_id;
        let file = self.file_repo.create(&req).await?;

        self.audit(ctx, "file.create", file.id).await;
        info!(file_id = %file.id, "Draft file created");
        Ok(file)
    }

    /// Shares a batch of draft files with users and departments.
    ///
    /// Preconditions, checked before any write:
    /// - at least one file selected,
    /// - at least one target selected,
    /// - every selected file is a draft owned by the caller.
    ///
    /// Each shared file moves to pending.
    pub async fn share_files(
        &self,
        ctx: &RequestContext,
        req: ShareFilesRequest,
    ) -> Result<Vec<DocumentFile>, AppError> {
        if req.file_ids.is_empty() {
            return Err(AppError::validation("Select at least one file to share"));
        }
        if req.targets.is_empty() {
            return Err(AppError::validation(
                "Select at least one user or department to share with",
            ));
        }

        // Load and validate the whole batch before mutating anything.
        let mut files = Vec::with_capacity(req.file_ids.len());
        for file_id in &req.file_ids {
            let file = self
                .file_repo
                .find_by_id(*file_id)
                .await?
                .ok_or_else(|| AppError::not_found("File not found"))?;

            if file.created_by != ctx.user_id && !ctx.is_admin() {
                return Err(AppError::authorization("You can only share your own files"));
            }
            if !file.can_share() {
                return Err(AppError::conflict(format!(
                    "\"{}\" is {} — only draft files can be shared",
                    file.title, file.status
                )));
            }
            files.push(file);
        }

        let mut shared = Vec::with_capacity(files.len());
        for file in files {
            for target in &req.targets {
                self.file_repo
                    .insert_share(file.id, *target, req.permission, ctx.user_id)
                    .await?;
            }

            let updated = self
                .file_repo
                .transition_status(file.id, FileStatus::Draft, FileStatus::Pending)
                .await?
                .ok_or_else(|| AppError::conflict("File is no longer a draft"))?;

            let (user_ids, department_ids) = split_targets(&req.targets);
            self.notifications
                .publish(&DomainEvent::new(
                    Some(ctx.user_id),
                    EventPayload::File(FileEvent::Shared {
                        file_id: updated.id,
                        title: updated.title.clone(),
                        user_ids,
                        department_ids,
                    }),
                ))
                .await;

            self.audit(ctx, "file.share", updated.id).await;
            shared.push(updated);
        }

        info!(
            user_id = %ctx.user_id,
            count = shared.len(),
            "Files shared"
        );
        Ok(shared)
    }

    /// Takes an approval decision on a pending file.
    ///
    /// Files flagged `requires_signature` can only be approved by a user
    /// with a stored, enabled signature.
    pub async fn decide(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        decision: FileDecision,
        comment: Option<&str>,
    ) -> Result<DocumentFile, AppError> {
        let file = self
            .file_repo
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        if !file.is_actionable() {
            return Err(AppError::conflict(format!(
                "File is {} and cannot be acted on",
                file.status
            )));
        }

        if decision == FileDecision::Approve && file.requires_signature {
            let actor = self
                .user_repo
                .find_by_id(ctx.user_id)
                .await?
                .ok_or_else(|| AppError::authentication("User not found"))?;
            if !actor.has_signature() {
                return Err(AppError::conflict(
                    "This file requires a signature; add one to your profile first",
                ));
            }
        }

        let to = decision.resulting_status();
        let updated = self
            .file_repo
            .transition_status(file_id, FileStatus::Pending, to)
            .await?
            .ok_or_else(|| AppError::conflict("File was already acted on"))?;

        self.notifications
            .publish(&DomainEvent::new(
                Some(ctx.user_id),
                EventPayload::File(FileEvent::StatusChanged {
                    file_id: updated.id,
                    title: updated.title.clone(),
                    from: FileStatus::Pending.to_string(),
                    to: to.to_string(),
                    owner_id: updated.created_by,
                }),
            ))
            .await;

        self.audit_with_comment(ctx, "file.decide", file_id, comment)
            .await;
        info!(file_id = %file_id, status = %to, "File decision recorded");
        Ok(updated)
    }

    /// Resubmits a sent-back file, returning it to draft.
    pub async fn resubmit(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
    ) -> Result<DocumentFile, AppError> {
        let file = self
            .file_repo
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        if file.created_by != ctx.user_id {
            return Err(AppError::authorization(
                "Only the creator can resubmit a file",
            ));
        }
        if !file.status.can_transition_to(FileStatus::Draft) {
            return Err(AppError::conflict(format!(
                "A {} file cannot be resubmitted",
                file.status
            )));
        }

        let updated = self
            .file_repo
            .transition_status(file_id, FileStatus::SentBack, FileStatus::Draft)
            .await?
            .ok_or_else(|| AppError::conflict("File is no longer sent back"))?;

        self.notifications
            .publish(&DomainEvent::new(
                Some(ctx.user_id),
                EventPayload::File(FileEvent::Resubmitted {
                    file_id: updated.id,
                    title: updated.title.clone(),
                }),
            ))
            .await;

        self.audit(ctx, "file.resubmit", file_id).await;
        Ok(updated)
    }

    /// Publishes an approved file into active circulation.
    pub async fn publish(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
    ) -> Result<DocumentFile, AppError> {
        let updated = self
            .file_repo
            .transition_status(file_id, FileStatus::Approved, FileStatus::Active)
            .await?
            .ok_or_else(|| AppError::conflict("Only approved files can be published"))?;

        self.notifications
            .publish(&DomainEvent::new(
                Some(ctx.user_id),
                EventPayload::File(FileEvent::StatusChanged {
                    file_id: updated.id,
                    title: updated.title.clone(),
                    from: FileStatus::Approved.to_string(),
                    to: FileStatus::Active.to_string(),
                    owner_id: updated.created_by,
                }),
            ))
            .await;

        self.audit(ctx, "file.publish", file_id).await;
        Ok(updated)
    }

    /// Best-effort audit write; failures are logged, never surfaced.
    async fn audit(&self, ctx: &RequestContext, action: &str, target_id: Uuid) {
        self.audit_with_comment(ctx, action, target_id, None).await;
    }

    async fn audit_with_comment(
        &self,
        ctx: &RequestContext,
        action: &str,
        target_id: Uuid,
        comment: Option<&str>,
    ) {
        let entry = CreateAuditLogEntry {
            actor_id: ctx.user_id,
            action: action.to_string(),
            target_type: "file".to_string(),
            target_id: Some(target_id),
            details: comment.map(|c| serde_json::json!({ "comment": c })),
            ip_address: Some(ctx.ip_address.clone()),
        };
        if let Err(e) = self.audit_repo.create(&entry).await {
            tracing::error!(error = %e, action = %action, "Failed to write audit entry");
        }
    }
}

/// Split mixed share targets into user and department id lists.
fn split_targets(targets: &[ShareTarget]) -> (Vec<Uuid>, Vec<Uuid>) {
    let mut user_ids = Vec::new();
    let mut department_ids = Vec::new();
    for target in targets {
        match target {
            ShareTarget::User(id) => user_ids.push(*id),
            ShareTarget::Department(id) => department_ids.push(*id),
        }
    }
    (user_ids, department_ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_statuses() {
        assert_eq!(FileDecision::Approve.resulting_status(), FileStatus::Approved);
        assert_eq!(FileDecision::Reject.resulting_status(), FileStatus::Rejected);
        assert_eq!(FileDecision::SendBack.resulting_status(), FileStatus::SentBack);
    }

    #[test]
    fn test_split_targets() {
        let user = Uuid::new_v4();
        let dept = Uuid::new_v4();
        let (users, depts) =
            split_targets(&[ShareTarget::User(user), ShareTarget::Department(dept)]);
        assert_eq!(users, vec![user]);
        assert_eq!(depts, vec![dept]);
    }
}
