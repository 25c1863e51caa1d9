//! Audit log repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use docuflow_core::error::{AppError, ErrorKind};
use docuflow_core::result::AppResult;
use docuflow_core::types::pagination::{PageRequest, PageResponse};
use docuflow_entity::audit::model::{AuditLogEntry, CreateAuditLogEntry};

/// Repository for immutable audit log entries.
#[derive(Debug, Clone)]
pub struct AuditLogRepository {
    pool: PgPool,
}

impl AuditLogRepository {
    /// Create a new audit log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append an audit entry.
    pub async fn create(&self, entry: &CreateAuditLogEntry) -> AppResult<AuditLogEntry> {
        sqlx::query_as::<_, AuditLogEntry>(
            "INSERT INTO audit_log \
             (actor_id, action, target_type, target_id, details, ip_address) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(entry.actor_id)
        .bind(&entry.action)
        .bind(&entry.target_type)
        .bind(entry.target_id)
        .bind(&entry.details)
        .bind(&entry.ip_address)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to write audit entry", e))
    }

    /// List audit entries for an actor, newest first.
    pub async fn find_by_actor(
        &self,
        actor_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AuditLogEntry>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM audit_log WHERE actor_id = $1")
            .bind(actor_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count audit entries", e)
            })?;

        let entries = sqlx::query_as::<_, AuditLogEntry>(
            "SELECT * FROM audit_log WHERE actor_id = $1 ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3",
        )
        .bind(actor_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list audit entries", e)
        })?;

        Ok(PageResponse::new(
            entries,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Count entries for one action name within a date range.
    pub async fn count_actions(
        &self,
        action: &str,
        since: Option<chrono::DateTime<chrono::Utc>>,
        until: Option<chrono::DateTime<chrono::Utc>>,
    ) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM audit_log \
             WHERE action = $1 \
               AND ($2::timestamptz IS NULL OR created_at >= $2) \
               AND ($3::timestamptz IS NULL OR created_at <= $3)",
        )
        .bind(action)
        .bind(since)
        .bind(until)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count actions", e))
    }
}
