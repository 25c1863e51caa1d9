//! `AuthUser` extractor — pulls the JWT from the Authorization header (or
//! the token cookie), validates it, and injects the request context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use docuflow_core::error::AppError;
use docuflow_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Name of the cookie mirroring the bearer token.
pub const TOKEN_COOKIE: &str = "token";

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .or_else(|| cookie_token(parts))
            .ok_or_else(|| ApiError(AppError::authentication("Missing authentication token")))?;

        // Signature and expiry checks are synchronous; the session row
        // check then confirms the token was not logged out.
        let claims = state.jwt_decoder.decode_access_token(&token)?;
        state
            .session_manager
            .validate_session(claims.session_id())
            .await?;

        let ip_address = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(',').next().unwrap_or(v).trim().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let user_agent = parts
            .headers
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let ctx = RequestContext::new(
            claims.user_id(),
            claims.session_id(),
            claims.role,
            claims.email,
            ip_address,
            user_agent,
        );

        Ok(AuthUser(ctx))
    }
}

/// Extract a bearer token from the Authorization header.
fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(String::from)
}

/// Extract the token cookie, the second store the client persists to.
fn cookie_token(parts: &Parts) -> Option<String> {
    let cookies = parts.headers.get("cookie")?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == TOKEN_COOKIE && !value.is_empty()).then(|| value.to_string())
    })
}
