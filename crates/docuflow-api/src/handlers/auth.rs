//! Auth handlers — login, logout, refresh, me.
//!
//! Login mirrors the token into a cookie (and the role into a second
//! cookie) so the route gate can read authentication state without a
//! script round-trip; logout clears both. A 401 from any endpoint tells
//! the client to drop its stores and return to the login entry point.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use docuflow_core::error::AppError;
use docuflow_core::types::response::ApiResponse;
use docuflow_entity::audit::model::CreateAuditLogEntry;

use crate::dto::request::{LoginRequest, RefreshRequest};
use crate::dto::response::{LoginResponse, MessageResponse, TokenResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::extractors::auth::TOKEN_COOKIE;
use crate::state::AppState;

/// Name of the cookie caching the role string for quick gating.
const ROLE_COOKIE: &str = "userRole";

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<LoginResponse>>), ApiError> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::validation("Email and password are required").into());
    }

    let result = state
        .session_manager
        .login(&req.email, &req.password, "unknown", None)
        .await?;

    audit_session(&state, result.user.id, "session.login").await;

    let max_age = state.config.auth.token_cookie_max_age_seconds;
    let jar = jar
        .add(persistent_cookie(
            TOKEN_COOKIE,
            result.tokens.access_token.clone(),
            max_age,
        ))
        .add(persistent_cookie(
            ROLE_COOKIE,
            result.user.role.to_string(),
            max_age,
        ));

    let response = LoginResponse {
        access_token: result.tokens.access_token,
        refresh_token: result.tokens.refresh_token,
        access_expires_at: result.tokens.access_expires_at,
        refresh_expires_at: result.tokens.refresh_expires_at,
        user: UserResponse::from(result.user),
    };

    Ok((jar, Json(ApiResponse::ok(response))))
}

/// POST /api/auth/logout
///
/// Idempotent: repeating the call leaves the same state — session
/// terminated, both cookies cleared.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    auth: AuthUser,
) -> Result<(CookieJar, Json<ApiResponse<MessageResponse>>), ApiError> {
    state
        .session_manager
        .logout(auth.user_id, auth.session_id)
        .await?;

    audit_session(&state, auth.user_id, "session.logout").await;

    let jar = jar
        .add(removal_cookie(TOKEN_COOKIE))
        .add(removal_cookie(ROLE_COOKIE));

    Ok((
        jar,
        Json(ApiResponse::ok_with_message(
            MessageResponse {
                message: "Logged out successfully".to_string(),
            },
            "Logged out successfully",
        )),
    ))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    let tokens = state.session_manager.refresh(&req.refresh_token).await?;

    Ok(Json(ApiResponse::ok(TokenResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        access_expires_at: tokens.access_expires_at,
        refresh_expires_at: tokens.refresh_expires_at,
    })))
}

/// GET /api/auth/me
///
/// Called on every fresh client load when a token is present. A failure
/// means the token is invalid or expired — never transient — and the
/// client tears its session down.
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state
        .session_manager
        .me(auth.user_id, auth.session_id)
        .await?;
    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}

/// Build a persistent cookie matching the client-side store contract.
fn persistent_cookie(name: &'static str, value: String, max_age_seconds: u64) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .max_age(time::Duration::seconds(max_age_seconds as i64))
        .same_site(SameSite::Lax)
        .build()
}

/// Build an expired cookie that removes the named store.
fn removal_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, ""))
        .path("/")
        .max_age(time::Duration::seconds(0))
        .build()
}

/// Best-effort session audit entry.
async fn audit_session(state: &AppState, user_id: uuid::Uuid, action: &str) {
    let entry = CreateAuditLogEntry {
        actor_id: user_id,
        action: action.to_string(),
        target_type: "session".to_string(),
        target_id: None,
        details: None,
        ip_address: None,
    };
    if let Err(e) = state.audit_repo.create(&entry).await {
        tracing::error!(error = %e, action = %action, "Failed to write audit entry");
    }
}
