//! Notification handlers — feed, read state, and preferences.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use docuflow_core::types::pagination::PageResponse;
use docuflow_core::types::response::ApiResponse;
use docuflow_entity::notification::model::Notification;
use docuflow_entity::notification::preference::NotificationPreference;

use crate::dto::request::SavePreferencesBody;
use crate::dto::response::{CountResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, Pagination};
use crate::state::AppState;

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Pagination(page): Pagination,
) -> Result<Json<ApiResponse<PageResponse<Notification>>>, ApiError> {
    let notifications = state.notification_service.list(&auth, page).await?;
    Ok(Json(ApiResponse::ok(notifications)))
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let count = state.notification_service.unread_count(&auth).await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}

/// PUT /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.notification_service.mark_read(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Notification marked as read".to_string(),
    })))
}

/// GET /api/notifications/preferences
pub async fn get_preferences(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<NotificationPreference>>, ApiError> {
    let preferences = state.notification_service.get_preferences(&auth).await?;
    Ok(Json(ApiResponse::ok(preferences)))
}

/// PUT /api/notifications/preferences
///
/// Saved preferences read back identical on the next load.
pub async fn save_preferences(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<SavePreferencesBody>,
) -> Result<Json<ApiResponse<NotificationPreference>>, ApiError> {
    let preferences = state
        .notification_service
        .save_preferences(&auth, body.preferences)
        .await?;

    Ok(Json(ApiResponse::ok_with_message(
        preferences,
        "Preferences saved",
    )))
}
