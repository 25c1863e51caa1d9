//! Self-service user handlers.

use axum::Json;
use axum::extract::State;

use docuflow_core::types::response::ApiResponse;

use crate::dto::request::SaveSignatureBody;
use crate::dto::response::{MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/users/me
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.user_service.get_user(auth.user_id).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}

/// PUT /api/users/me/signature
pub async fn save_signature(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<SaveSignatureBody>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .user_service
        .save_signature(&auth, body.kind, &body.data)
        .await?;

    Ok(Json(ApiResponse::ok_with_message(
        MessageResponse {
            message: "Signature saved".to_string(),
        },
        "Signature saved",
    )))
}
