//! Route definitions for the DocuFlow HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use docuflow_core::types::response::ApiResponse;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(admin_routes())
        .merge(file_routes())
        .merge(request_routes())
        .merge(notification_routes())
        .merge(report_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        // Unmatched paths still pass through the route gate, so the
        // redirect rules apply to every app-shell path.
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::gate::route_gate,
        ))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: login, logout, refresh, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/me", get(handlers::auth::me))
}

/// User self-service endpoints
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(handlers::user::get_profile))
        .route("/users/me/signature", put(handlers::user::save_signature))
}

/// Admin-only endpoints: user and department management
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(handlers::admin::users::list_users))
        .route("/admin/users", post(handlers::admin::users::create_user))
        .route("/admin/users/{id}", get(handlers::admin::users::get_user))
        .route("/admin/users/{id}", put(handlers::admin::users::update_user))
        .route(
            "/admin/users/{id}",
            delete(handlers::admin::users::delete_user),
        )
        .route(
            "/admin/users/{id}/password",
            put(handlers::admin::users::reset_password),
        )
        .route(
            "/admin/users/{id}/status",
            put(handlers::admin::users::set_active),
        )
        .route(
            "/admin/departments",
            get(handlers::admin::departments::list_departments),
        )
        .route(
            "/admin/departments",
            post(handlers::admin::departments::create_department),
        )
        .route(
            "/admin/departments/unassigned-directors",
            get(handlers::admin::departments::unassigned_directors),
        )
        .route(
            "/admin/departments/{id}",
            get(handlers::admin::departments::get_department),
        )
        .route(
            "/admin/departments/{id}",
            put(handlers::admin::departments::update_department),
        )
        .route(
            "/admin/departments/{id}",
            delete(handlers::admin::departments::delete_department),
        )
        .route(
            "/admin/departments/{id}/director",
            put(handlers::admin::departments::assign_director),
        )
}

/// File workflow endpoints
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files", get(handlers::file::list_files))
        .route("/files", post(handlers::file::create_file))
        .route("/files/share", post(handlers::file::share_files))
        .route("/files/{id}", get(handlers::file::get_file))
        .route("/files/{id}/action", post(handlers::file::decide_file))
        .route("/files/{id}/resubmit", post(handlers::file::resubmit_file))
        .route("/files/{id}/publish", post(handlers::file::publish_file))
}

/// Approval request endpoints
fn request_routes() -> Router<AppState> {
    Router::new()
        .route("/requests", get(handlers::request::list_requests))
        .route("/requests", post(handlers::request::create_request))
        .route("/requests/inbox", get(handlers::request::inbox))
        .route("/requests/{id}", get(handlers::request::get_request))
        .route(
            "/requests/{id}/action",
            post(handlers::request::act_on_request),
        )
}

/// Notification endpoints
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications),
        )
        .route(
            "/notifications/unread-count",
            get(handlers::notification::unread_count),
        )
        .route(
            "/notifications/preferences",
            get(handlers::notification::get_preferences),
        )
        .route(
            "/notifications/preferences",
            put(handlers::notification::save_preferences),
        )
        .route(
            "/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
}

/// Report endpoints
fn report_routes() -> Router<AppState> {
    Router::new().route("/reports/summary", get(handlers::report::summary))
}

/// Health endpoints
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Envelope-shaped 404 for unmatched paths.
async fn not_found() -> (axum::http::StatusCode, axum::Json<ApiResponse<()>>) {
    (
        axum::http::StatusCode::NOT_FOUND,
        axum::Json(ApiResponse::err("NOT_FOUND", "Resource not found")),
    )
}
