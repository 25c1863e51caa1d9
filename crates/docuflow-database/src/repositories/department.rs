//! Department repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use docuflow_core::error::{AppError, ErrorKind};
use docuflow_core::result::AppResult;
use docuflow_core::types::pagination::{PageRequest, PageResponse};
use docuflow_entity::department::model::{CreateDepartment, Department, UpdateDepartment};

/// Repository for department CRUD and director-assignment operations.
#[derive(Debug, Clone)]
pub struct DepartmentRepository {
    pool: PgPool,
}

impl DepartmentRepository {
    /// Create a new department repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a department by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Department>> {
        sqlx::query_as::<_, Department>("SELECT * FROM departments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find department", e)
            })
    }

    /// Find a department by its short code (case-insensitive).
    pub async fn find_by_code(&self, code: &str) -> AppResult<Option<Department>> {
        sqlx::query_as::<_, Department>("SELECT * FROM departments WHERE UPPER(code) = UPPER($1)")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find department by code", e)
            })
    }

    /// Find the department a director is assigned to.
    pub async fn find_by_director(&self, director_id: Uuid) -> AppResult<Option<Department>> {
        sqlx::query_as::<_, Department>("SELECT * FROM departments WHERE director_id = $1")
            .bind(director_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    "Failed to find department by director",
                    e,
                )
            })
    }

    /// List all departments with pagination.
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Department>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM departments")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count departments", e)
            })?;

        let departments = sqlx::query_as::<_, Department>(
            "SELECT * FROM departments ORDER BY name LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list departments", e))?;

        Ok(PageResponse::new(
            departments,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Insert a new department. Codes are stored uppercased.
    pub async fn create(&self, department: &CreateDepartment) -> AppResult<Department> {
        sqlx::query_as::<_, Department>(
            "INSERT INTO departments (name, code, description) \
             VALUES ($1, UPPER($2), $3) RETURNING *",
        )
        .bind(&department.name)
        .bind(&department.code)
        .bind(&department.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create department", e))
    }

    /// Update a department's fields. Unset fields keep their value.
    pub async fn update(&self, update: &UpdateDepartment) -> AppResult<Option<Department>> {
        sqlx::query_as::<_, Department>(
            "UPDATE departments SET \
             name = COALESCE($2, name), \
             code = COALESCE(UPPER($3), code), \
             description = COALESCE($4, description), \
             is_active = COALESCE($5, is_active), \
             updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(update.id)
        .bind(&update.name)
        .bind(&update.code)
        .bind(&update.description)
        .bind(update.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update department", e))
    }

    /// Assign a director to a department (or clear with `None`).
    pub async fn set_director(
        &self,
        id: Uuid,
        director_id: Option<Uuid>,
    ) -> AppResult<Option<Department>> {
        sqlx::query_as::<_, Department>(
            "UPDATE departments SET director_id = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(director_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to assign director", e))
    }

    /// Delete a department.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete department", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of departments.
    pub async fn count_all(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM departments")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count departments", e)
            })
    }
}
