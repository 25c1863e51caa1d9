//! Session lifecycle manager — login, logout, profile refresh, token refresh.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use docuflow_core::error::AppError;
use docuflow_database::repositories::user::UserRepository;
use docuflow_entity::session::Session;
use docuflow_entity::user::User;

use crate::jwt::encoder::TokenPair;
use crate::jwt::{JwtDecoder, JwtEncoder};
use crate::password::PasswordHasher;

use super::store::SessionStore;

/// Result of a successful login.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LoginResult {
    /// Generated token pair.
    pub tokens: TokenPair,
    /// Created session.
    pub session: Session,
    /// The authenticated user.
    pub user: User,
}

/// Manages the complete session lifecycle.
///
/// Login moves the client from unauthenticated to authenticated; a failed
/// profile refresh or logout drops straight back to unauthenticated —
/// there is no retry state.
#[derive(Debug, Clone)]
pub struct SessionManager {
    /// JWT encoder for token generation.
    jwt_encoder: Arc<JwtEncoder>,
    /// JWT decoder for token validation.
    jwt_decoder: Arc<JwtDecoder>,
    /// Session persistence.
    session_store: Arc<SessionStore>,
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    password_hasher: Arc<PasswordHasher>,
}

impl SessionManager {
    /// Creates a new session manager with all required dependencies.
    pub fn new(
        jwt_encoder: Arc<JwtEncoder>,
        jwt_decoder: Arc<JwtDecoder>,
        session_store: Arc<SessionStore>,
        user_repo: Arc<UserRepository>,
        password_hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            jwt_encoder,
            jwt_decoder,
            session_store,
            user_repo,
            password_hasher,
        }
    }

    /// Performs the complete login flow:
    ///
    /// 1. Find the user by email
    /// 2. Check the account is active
    /// 3. Verify the password
    /// 4. Create a session row carrying the role snapshot
    /// 5. Generate the JWT pair and record the login time
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        ip_address: &str,
        user_agent: Option<&str>,
    ) -> Result<LoginResult, AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid email or password"))?;

        if !user.can_login() {
            warn!(user_id = %user.id, "Login attempt on deactivated account");
            return Err(AppError::authentication("Account is deactivated"));
        }

        let password_valid = self
            .password_hasher
            .verify_password(password, &user.password_hash)?;

        if !password_valid {
            return Err(AppError::authentication("Invalid email or password"));
        }

        // The session row is created first so the tokens can carry its id;
        // the refresh hash is rotated in once the pair exists.
        let session = self
            .session_store
            .create_session(user.id, user.role, ip_address, user_agent)
            .await?;

        let tokens =
            self.jwt_encoder
                .generate_token_pair(user.id, session.id, user.role, &user.email)?;

        self.session_store
            .rotate_refresh_token(session.id, &tokens.refresh_token)
            .await?;

        let _ = self.user_repo.update_last_login(user.id, Utc::now()).await;

        info!(
            user_id = %user.id,
            session_id = %session.id,
            role = %user.role,
            "Login successful"
        );

        Ok(LoginResult {
            tokens,
            session,
            user,
        })
    }

    /// Returns the current user for a validated token.
    ///
    /// Called on every fresh load when a token is present. Any failure is
    /// treated as "token invalid or expired" — the session is terminated
    /// and the caller clears its stores; there is no transient-failure
    /// path.
    pub async fn me(&self, user_id: Uuid, session_id: Uuid) -> Result<User, AppError> {
        let session = self.validate_session(session_id).await?;

        match self.user_repo.find_by_id(user_id).await? {
            Some(user) if user.can_login() => {
                let _ = self.session_store.touch_activity(session.id).await;
                Ok(user)
            }
            _ => {
                self.session_store
                    .terminate(session.id, "Profile refresh failed")
                    .await?;
                Err(AppError::authentication("Session is no longer valid"))
            }
        }
    }

    /// Performs logout. Idempotent — logging out an already-terminated
    /// session succeeds without changing state.
    pub async fn logout(&self, user_id: Uuid, session_id: Uuid) -> Result<(), AppError> {
        self.session_store.terminate(session_id, "User logout").await?;

        info!(user_id = %user_id, session_id = %session_id, "Logout completed");
        Ok(())
    }

    /// Refreshes an access token using a valid refresh token.
    ///
    /// Re-checks the user row (the role may have changed) and rotates the
    /// stored refresh token hash.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self.jwt_decoder.decode_refresh_token(refresh_token)?;
        let session = self.validate_session(claims.session_id()).await?;

        if !self.session_store.refresh_token_matches(&session, refresh_token) {
            // A mismatch means the token was already rotated or forged.
            self.session_store
                .terminate(session.id, "Refresh token mismatch")
                .await?;
            return Err(AppError::authentication("Refresh token is no longer valid"));
        }

        let user = self
            .user_repo
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::authentication("User not found"))?;

        if !user.can_login() {
            self.session_store
                .terminate(session.id, "Account deactivated")
                .await?;
            return Err(AppError::authentication("Account is deactivated"));
        }

        let tokens =
            self.jwt_encoder
                .generate_token_pair(user.id, session.id, user.role, &user.email)?;

        self.session_store
            .rotate_refresh_token(session.id, &tokens.refresh_token)
            .await?;
        self.session_store.touch_activity(session.id).await?;

        info!(user_id = %user.id, session_id = %session.id, "Token refreshed");

        Ok(tokens)
    }

    /// Validates that a session exists and is still active.
    pub async fn validate_session(&self, session_id: Uuid) -> Result<Session, AppError> {
        let session = self
            .session_store
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| AppError::authentication("Session not found"))?;

        if !session.is_active() {
            return Err(AppError::authentication("Session has been terminated"));
        }

        Ok(session)
    }
}
