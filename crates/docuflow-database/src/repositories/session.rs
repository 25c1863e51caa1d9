//! Session repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use docuflow_core::error::{AppError, ErrorKind};
use docuflow_core::result::AppResult;
use docuflow_entity::session::model::{CreateSession, Session};

/// Repository for authentication session rows.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a session by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Session>> {
        sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find session", e))
    }

    /// Insert a new session.
    pub async fn create(&self, session: &CreateSession) -> AppResult<Session> {
        sqlx::query_as::<_, Session>(
            "INSERT INTO sessions \
             (user_id, role, refresh_token_hash, ip_address, user_agent, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(session.user_id)
        .bind(session.role)
        .bind(&session.refresh_token_hash)
        .bind(&session.ip_address)
        .bind(&session.user_agent)
        .bind(session.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create session", e))
    }

    /// Terminate a session. A no-op for already-terminated sessions, which
    /// keeps logout idempotent.
    pub async fn terminate(&self, id: Uuid, reason: &str) -> AppResult<()> {
        sqlx::query(
            "UPDATE sessions SET terminated_at = NOW(), terminated_reason = $2 \
             WHERE id = $1 AND terminated_at IS NULL",
        )
        .bind(id)
        .bind(reason)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to terminate session", e))?;
        Ok(())
    }

    /// Replace the refresh token hash after rotation.
    pub async fn update_refresh_token(&self, id: Uuid, refresh_token_hash: &str) -> AppResult<()> {
        sqlx::query("UPDATE sessions SET refresh_token_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(refresh_token_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update refresh token", e)
            })?;
        Ok(())
    }

    /// Record session activity.
    pub async fn touch_activity(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE sessions SET last_activity = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to touch session activity", e)
            })?;
        Ok(())
    }

    /// Terminate every expired session still marked active. Returns the
    /// number of sessions cleaned up.
    pub async fn cleanup_expired(&self) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE sessions SET terminated_at = NOW(), terminated_reason = 'expired' \
             WHERE terminated_at IS NULL AND expires_at <= NOW()",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to clean up sessions", e)
        })?;
        Ok(result.rows_affected())
    }
}
