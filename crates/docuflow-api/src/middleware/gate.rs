//! Edge-level route gating middleware.
//!
//! Evaluates the route rule table on every non-API request using only the
//! token cookie — no async user fetch. API routes authenticate through
//! the `AuthUser` extractor instead.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use docuflow_auth::gate::{DASHBOARD_PATH, GateDecision, LOGIN_PATH};

use crate::extractors::auth::TOKEN_COOKIE;
use crate::state::AppState;

/// Applies the route gating rule table.
pub async fn route_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();

    // The API carries its own auth; the gate only covers app-shell paths.
    if path.starts_with("/api") {
        return next.run(request).await;
    }

    let has_token = request
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|cookies| {
            cookies.split(';').any(|pair| {
                pair.trim()
                    .split_once('=')
                    .is_some_and(|(name, value)| name == TOKEN_COOKIE && !value.is_empty())
            })
        });

    match state.access_gate.evaluate_route(&path, has_token) {
        GateDecision::Allow => next.run(request).await,
        GateDecision::RedirectToLogin => Redirect::temporary(LOGIN_PATH).into_response(),
        GateDecision::RedirectToDashboard => Redirect::temporary(DASHBOARD_PATH).into_response(),
    }
}
