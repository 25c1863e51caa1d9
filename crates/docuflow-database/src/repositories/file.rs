//! Document file repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use docuflow_core::error::{AppError, ErrorKind};
use docuflow_core::result::AppResult;
use docuflow_core::types::pagination::{PageRequest, PageResponse};
use docuflow_entity::file::model::{CreateDocumentFile, DocumentFile};
use docuflow_entity::file::share::{FileShare, SharePermission, ShareTarget};
use docuflow_entity::file::status::FileStatus;

/// Repository for document files and their share entries.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a file by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<DocumentFile>> {
        sqlx::query_as::<_, DocumentFile>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    /// List files created by a user.
    pub async fn find_by_creator(
        &self,
        created_by: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<DocumentFile>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM files WHERE created_by = $1")
            .bind(created_by)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count files", e))?;

        let files = sqlx::query_as::<_, DocumentFile>(
            "SELECT * FROM files WHERE created_by = $1 ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3",
        )
        .bind(created_by)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))?;

        Ok(PageResponse::new(
            files,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List pending files shared into a department (the department inbox).
    pub async fn find_pending_for_department(
        &self,
        department_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<DocumentFile>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(DISTINCT f.id) FROM files f \
             JOIN file_shares s ON s.file_id = f.id \
             WHERE f.status = $1 AND s.department_id = $2",
        )
        .bind(FileStatus::Pending)
        .bind(department_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count pending files", e)
        })?;

        let files = sqlx::query_as::<_, DocumentFile>(
            "SELECT DISTINCT f.* FROM files f \
             JOIN file_shares s ON s.file_id = f.id \
             WHERE f.status = $1 AND s.department_id = $2 \
             ORDER BY f.created_at DESC LIMIT $3 OFFSET $4",
        )
        .bind(FileStatus::Pending)
        .bind(department_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list pending files", e)
        })?;

        Ok(PageResponse::new(
            files,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Insert a new draft file.
    pub async fn create(&self, file: &CreateDocumentFile) -> AppResult<DocumentFile> {
        sqlx::query_as::<_, DocumentFile>(
            "INSERT INTO files \
             (title, description, category, created_by, attachment_name, attachment_url, \
              attachment_size, requires_signature) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(&file.title)
        .bind(&file.description)
        .bind(&file.category)
        .bind(file.created_by)
        .bind(&file.attachment_name)
        .bind(&file.attachment_url)
        .bind(file.attachment_size)
        .bind(file.requires_signature)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create file", e))
    }

    /// Move a file to a new status, guarded by the expected current status.
    ///
    /// Returns `None` when the file is missing or its status no longer
    /// matches `from` (someone acted first).
    pub async fn transition_status(
        &self,
        id: Uuid,
        from: FileStatus,
        to: FileStatus,
    ) -> AppResult<Option<DocumentFile>> {
        sqlx::query_as::<_, DocumentFile>(
            "UPDATE files SET status = $3, updated_at = NOW() \
             WHERE id = $1 AND status = $2 RETURNING *",
        )
        .bind(id)
        .bind(from)
        .bind(to)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update file status", e)
        })
    }

    /// Insert one share entry for a file.
    pub async fn insert_share(
        &self,
        file_id: Uuid,
        target: ShareTarget,
        permission: SharePermission,
        shared_by: Uuid,
    ) -> AppResult<FileShare> {
        let (user_id, department_id) = match target {
            ShareTarget::User(id) => (Some(id), None),
            ShareTarget::Department(id) => (None, Some(id)),
        };

        sqlx::query_as::<_, FileShare>(
            "INSERT INTO file_shares (file_id, user_id, department_id, permission, shared_by) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(file_id)
        .bind(user_id)
        .bind(department_id)
        .bind(permission)
        .bind(shared_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create share", e))
    }

    /// List share entries for a file, oldest first.
    pub async fn find_shares(&self, file_id: Uuid) -> AppResult<Vec<FileShare>> {
        sqlx::query_as::<_, FileShare>(
            "SELECT * FROM file_shares WHERE file_id = $1 ORDER BY shared_at",
        )
        .bind(file_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list shares", e))
    }

    /// Delete a file.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Count files grouped by status, optionally bounded to a date range.
    pub async fn count_by_status(
        &self,
        since: Option<chrono::DateTime<chrono::Utc>>,
        until: Option<chrono::DateTime<chrono::Utc>>,
    ) -> AppResult<Vec<(FileStatus, i64)>> {
        let rows: Vec<(FileStatus, i64)> = sqlx::query_as(
            "SELECT status, COUNT(*) FROM files \
             WHERE ($1::timestamptz IS NULL OR created_at >= $1) \
               AND ($2::timestamptz IS NULL OR created_at <= $2) \
             GROUP BY status",
        )
        .bind(since)
        .bind(until)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count files by status", e)
        })?;
        Ok(rows)
    }

    /// Count files created by members of each department.
    pub async fn count_by_department(
        &self,
        since: Option<chrono::DateTime<chrono::Utc>>,
        until: Option<chrono::DateTime<chrono::Utc>>,
    ) -> AppResult<Vec<(Uuid, i64)>> {
        let rows: Vec<(Uuid, i64)> = sqlx::query_as(
            "SELECT u.department_id, COUNT(*) FROM files f \
             JOIN users u ON u.id = f.created_by \
             WHERE u.department_id IS NOT NULL \
               AND ($1::timestamptz IS NULL OR f.created_at >= $1) \
               AND ($2::timestamptz IS NULL OR f.created_at <= $2) \
             GROUP BY u.department_id",
        )
        .bind(since)
        .bind(until)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count files by department", e)
        })?;
        Ok(rows)
    }
}
