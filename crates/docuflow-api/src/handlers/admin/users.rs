//! Admin user management handlers.
//!
//! Every handler gates on the admin role before issuing its first query.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use docuflow_core::types::pagination::PageResponse;
use docuflow_core::types::response::ApiResponse;
use docuflow_entity::user::model::UpdateUser;
use docuflow_service::user::service::CreateUserRequest;

use crate::dto::request::{CreateUserBody, ResetPasswordBody, SetActiveBody, UpdateUserBody};
use crate::dto::response::{MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, Pagination};
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Pagination(page): Pagination,
) -> Result<Json<ApiResponse<PageResponse<UserResponse>>>, ApiError> {
    require_admin(&state, &auth)?;

    let users = state.user_service.list_users(page).await?;
    let response = PageResponse::new(
        users.items.into_iter().map(UserResponse::from).collect(),
        users.page,
        users.page_size,
        users.total_items,
    );
    Ok(Json(ApiResponse::ok(response)))
}

/// GET /api/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    require_admin(&state, &auth)?;

    let user = state.user_service.get_user(id).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}

/// POST /api/admin/users
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateUserBody>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    require_admin(&state, &auth)?;

    let user = state
        .user_service
        .create_user(
            &auth,
            CreateUserRequest {
                first_name: body.first_name,
                last_name: body.last_name,
                email: body.email,
                password: body.password,
                role: body.role,
                department_id: body.department_id,
                position: body.position,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok_with_message(
        UserResponse::from(user),
        "User created",
    )))
}

/// PUT /api/admin/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateUserBody>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    require_admin(&state, &auth)?;

    let user = state
        .user_service
        .update_user(
            &auth,
            UpdateUser {
                id,
                first_name: body.first_name,
                last_name: body.last_name,
                email: body.email,
                role: body.role,
                department_id: body.department_id,
                position: body.position,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok_with_message(
        UserResponse::from(user),
        "User updated",
    )))
}

/// PUT /api/admin/users/{id}/password
pub async fn reset_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<ResetPasswordBody>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    require_admin(&state, &auth)?;

    state
        .user_service
        .reset_password(&auth, id, &body.password, &body.confirm_password)
        .await?;

    Ok(Json(ApiResponse::ok_with_message(
        MessageResponse {
            message: "Password reset".to_string(),
        },
        "Password reset",
    )))
}

/// PUT /api/admin/users/{id}/status
pub async fn set_active(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<SetActiveBody>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    require_admin(&state, &auth)?;

    let user = state.user_service.set_active(&auth, id, body.is_active).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}

/// DELETE /api/admin/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    require_admin(&state, &auth)?;

    state.user_service.delete_user(&auth, id).await?;
    Ok(Json(ApiResponse::ok_with_message(
        MessageResponse {
            message: "User deleted".to_string(),
        },
        "User deleted",
    )))
}
