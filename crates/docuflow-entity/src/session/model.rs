//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::user::UserRole;

/// An authentication session.
///
/// Sessions are created on login and destroyed on logout, expiry, or a
/// failed profile refresh. The role is cached here (and in the JWT claims)
/// so route gating never needs an extra user fetch.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Unique session identifier.
    pub id: Uuid,
    /// The user this session belongs to.
    pub user_id: Uuid,
    /// The user's role at login time (redundant cache for fast gating).
    pub role: UserRole,
    /// SHA-256 hash of the refresh token.
    pub refresh_token_hash: Option<String>,
    /// IP address from which the session was created.
    pub ip_address: String,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// Reason for termination.
    pub terminated_reason: Option<String>,
    /// When the session was terminated.
    pub terminated_at: Option<DateTime<Utc>>,
    /// When the session was created (login time).
    pub created_at: DateTime<Utc>,
    /// When the session expires (absolute timeout).
    pub expires_at: DateTime<Utc>,
    /// Last activity timestamp.
    pub last_activity: DateTime<Utc>,
}

impl Session {
    /// Check whether the session is still active (not terminated and not expired).
    pub fn is_active(&self) -> bool {
        self.terminated_at.is_none() && self.expires_at > Utc::now()
    }

    /// Check whether the session has been terminated.
    pub fn is_terminated(&self) -> bool {
        self.terminated_at.is_some()
    }

    /// Check whether the session has expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Calculate how long the session has been idle (in seconds).
    pub fn idle_seconds(&self) -> i64 {
        (Utc::now() - self.last_activity).num_seconds().max(0)
    }
}

/// Data required to create a new session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSession {
    /// The user this session belongs to.
    pub user_id: Uuid,
    /// The user's role at login time.
    pub role: UserRole,
    /// SHA-256 hash of the refresh token.
    pub refresh_token_hash: Option<String>,
    /// IP address of the client.
    pub ip_address: String,
    /// User-Agent header.
    pub user_agent: Option<String>,
    /// When the session expires.
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_session(expires_in_hours: i64) -> Session {
        Session {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            role: UserRole::Department,
            refresh_token_hash: None,
            ip_address: "127.0.0.1".to_string(),
            user_agent: None,
            terminated_reason: None,
            terminated_at: None,
            created_at: Utc::now(),
            expires_at: Utc::now() + Duration::hours(expires_in_hours),
            last_activity: Utc::now(),
        }
    }

    #[test]
    fn test_active_session() {
        assert!(sample_session(1).is_active());
    }

    #[test]
    fn test_expired_session_is_not_active() {
        let session = sample_session(-1);
        assert!(session.is_expired());
        assert!(!session.is_active());
    }

    #[test]
    fn test_terminated_session_is_not_active() {
        let mut session = sample_session(1);
        session.terminated_at = Some(Utc::now());
        assert!(!session.is_active());
    }
}
