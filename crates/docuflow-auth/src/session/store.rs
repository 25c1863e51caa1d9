//! Session storage operations wrapping the database repository.

use std::sync::Arc;

use chrono::{Duration, Utc};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use docuflow_core::config::session::SessionConfig;
use docuflow_core::error::AppError;
use docuflow_database::repositories::session::SessionRepository;
use docuflow_entity::session::{CreateSession, Session};
use docuflow_entity::user::UserRole;

/// Abstracts session persistence operations.
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// Session database repository.
    repo: Arc<SessionRepository>,
    /// Session configuration.
    config: SessionConfig,
}

impl SessionStore {
    /// Creates a new session store.
    pub fn new(repo: Arc<SessionRepository>, config: SessionConfig) -> Self {
        Self { repo, config }
    }

    /// Creates a new session record in the database.
    ///
    /// The refresh token hash is written afterwards via
    /// [`SessionStore::rotate_refresh_token`], once tokens have been minted
    /// against the new session id.
    pub async fn create_session(
        &self,
        user_id: Uuid,
        role: UserRole,
        ip_address: &str,
        user_agent: Option<&str>,
    ) -> Result<Session, AppError> {
        let expires_at = Utc::now() + Duration::hours(self.config.absolute_timeout_hours as i64);

        self.repo
            .create(&CreateSession {
                user_id,
                role,
                refresh_token_hash: None,
                ip_address: ip_address.to_string(),
                user_agent: user_agent.map(String::from),
                expires_at,
            })
            .await
    }

    /// Finds a session by ID.
    pub async fn find_by_id(&self, session_id: Uuid) -> Result<Option<Session>, AppError> {
        self.repo.find_by_id(session_id).await
    }

    /// Terminates a session (idempotent).
    pub async fn terminate(&self, session_id: Uuid, reason: &str) -> Result<(), AppError> {
        self.repo.terminate(session_id, reason).await
    }

    /// Checks that a stored refresh token hash matches the presented token.
    pub fn refresh_token_matches(&self, session: &Session, refresh_token: &str) -> bool {
        session
            .refresh_token_hash
            .as_deref()
            .is_some_and(|stored| stored == sha256_hex(refresh_token))
    }

    /// Rotates the stored refresh token hash.
    pub async fn rotate_refresh_token(
        &self,
        session_id: Uuid,
        refresh_token: &str,
    ) -> Result<(), AppError> {
        self.repo
            .update_refresh_token(session_id, &sha256_hex(refresh_token))
            .await
    }

    /// Records session activity.
    pub async fn touch_activity(&self, session_id: Uuid) -> Result<(), AppError> {
        self.repo.touch_activity(session_id).await
    }
}

/// Hex-encoded SHA-256 of a token string.
fn sha256_hex(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex_is_stable() {
        assert_eq!(sha256_hex("token"), sha256_hex("token"));
        assert_ne!(sha256_hex("token"), sha256_hex("other"));
        assert_eq!(sha256_hex("token").len(), 64);
    }
}
