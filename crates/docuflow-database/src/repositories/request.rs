//! Approval request repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use docuflow_core::error::{AppError, ErrorKind};
use docuflow_core::result::AppResult;
use docuflow_core::types::pagination::{PageRequest, PageResponse};
use docuflow_entity::request::model::{ApprovalRequest, CreateApprovalRequest};
use docuflow_entity::request::status::RequestStatus;

/// Repository for approval requests and the pending inbox.
#[derive(Debug, Clone)]
pub struct RequestRepository {
    pool: PgPool,
}

impl RequestRepository {
    /// Create a new request repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a request by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ApprovalRequest>> {
        sqlx::query_as::<_, ApprovalRequest>("SELECT * FROM requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find request", e))
    }

    /// List requests created by a user.
    pub async fn find_by_creator(
        &self,
        created_by: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ApprovalRequest>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM requests WHERE created_by = $1")
            .bind(created_by)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count requests", e)
            })?;

        let requests = sqlx::query_as::<_, ApprovalRequest>(
            "SELECT * FROM requests WHERE created_by = $1 ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3",
        )
        .bind(created_by)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list requests", e))?;

        Ok(PageResponse::new(
            requests,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List the pending inbox for a department.
    ///
    /// Rows keep their fetch order (newest first); no further reordering
    /// happens after individual items are acted on.
    pub async fn find_inbox(
        &self,
        department_id: Uuid,
        assigned_director_id: Option<Uuid>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ApprovalRequest>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM requests \
             WHERE status = $1 AND target_department_id = $2 \
               AND ($3::uuid IS NULL OR assigned_director_id IS NULL OR assigned_director_id = $3)",
        )
        .bind(RequestStatus::Pending)
        .bind(department_id)
        .bind(assigned_director_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count inbox", e))?;

        let requests = sqlx::query_as::<_, ApprovalRequest>(
            "SELECT * FROM requests \
             WHERE status = $1 AND target_department_id = $2 \
               AND ($3::uuid IS NULL OR assigned_director_id IS NULL OR assigned_director_id = $3) \
             ORDER BY created_at DESC LIMIT $4 OFFSET $5",
        )
        .bind(RequestStatus::Pending)
        .bind(department_id)
        .bind(assigned_director_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list inbox", e))?;

        Ok(PageResponse::new(
            requests,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Insert a new pending request.
    pub async fn create(&self, request: &CreateApprovalRequest) -> AppResult<ApprovalRequest> {
        let attachments = serde_json::to_value(&request.attachments)
            .map_err(|e| AppError::with_source(ErrorKind::Serialization, "Invalid attachments", e))?;

        sqlx::query_as::<_, ApprovalRequest>(
            "INSERT INTO requests \
             (title, description, target_department_id, assigned_director_id, priority, \
              category, created_by, attachments) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.target_department_id)
        .bind(request.assigned_director_id)
        .bind(request.priority)
        .bind(&request.category)
        .bind(request.created_by)
        .bind(attachments)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create request", e))
    }

    /// Apply an action outcome to a pending request.
    ///
    /// Guarded on `status = pending` so concurrent actions cannot both
    /// succeed; returns `None` when the request was already acted on.
    pub async fn apply_action(
        &self,
        id: Uuid,
        status: RequestStatus,
        comment: Option<&str>,
        acted_by: Uuid,
    ) -> AppResult<Option<ApprovalRequest>> {
        sqlx::query_as::<_, ApprovalRequest>(
            "UPDATE requests SET status = $2, action_comment = $3, acted_by = $4, \
             acted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND status = $5 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(comment)
        .bind(acted_by)
        .bind(RequestStatus::Pending)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to apply action", e))
    }

    /// Count requests grouped by status, optionally bounded to a date range.
    pub async fn count_by_status(
        &self,
        since: Option<chrono::DateTime<chrono::Utc>>,
        until: Option<chrono::DateTime<chrono::Utc>>,
    ) -> AppResult<Vec<(RequestStatus, i64)>> {
        let rows: Vec<(RequestStatus, i64)> = sqlx::query_as(
            "SELECT status, COUNT(*) FROM requests \
             WHERE ($1::timestamptz IS NULL OR created_at >= $1) \
               AND ($2::timestamptz IS NULL OR created_at <= $2) \
             GROUP BY status",
        )
        .bind(since)
        .bind(until)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count requests by status", e)
        })?;
        Ok(rows)
    }

    /// Count requests targeting each department.
    pub async fn count_by_department(
        &self,
        since: Option<chrono::DateTime<chrono::Utc>>,
        until: Option<chrono::DateTime<chrono::Utc>>,
    ) -> AppResult<Vec<(Uuid, i64)>> {
        let rows: Vec<(Uuid, i64)> = sqlx::query_as(
            "SELECT target_department_id, COUNT(*) FROM requests \
             WHERE ($1::timestamptz IS NULL OR created_at >= $1) \
               AND ($2::timestamptz IS NULL OR created_at <= $2) \
             GROUP BY target_department_id",
        )
        .bind(since)
        .bind(until)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to count requests by department",
                e,
            )
        })?;
        Ok(rows)
    }
}
