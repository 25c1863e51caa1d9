//! Admin department management handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use docuflow_core::types::pagination::PageResponse;
use docuflow_core::types::response::ApiResponse;
use docuflow_entity::department::model::{CreateDepartment, Department, UpdateDepartment};

use crate::dto::request::{AssignDirectorBody, CreateDepartmentBody, UpdateDepartmentBody};
use crate::dto::response::{MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, Pagination};
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// GET /api/admin/departments
pub async fn list_departments(
    State(state): State<AppState>,
    auth: AuthUser,
    Pagination(page): Pagination,
) -> Result<Json<ApiResponse<PageResponse<Department>>>, ApiError> {
    require_admin(&state, &auth)?;

    let departments = state.department_service.list_departments(page).await?;
    Ok(Json(ApiResponse::ok(departments)))
}

/// GET /api/admin/departments/{id}
pub async fn get_department(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Department>>, ApiError> {
    require_admin(&state, &auth)?;

    let department = state.department_service.get_department(id).await?;
    Ok(Json(ApiResponse::ok(department)))
}

/// POST /api/admin/departments
pub async fn create_department(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateDepartmentBody>,
) -> Result<Json<ApiResponse<Department>>, ApiError> {
    require_admin(&state, &auth)?;

    let department = state
        .department_service
        .create_department(
            &auth,
            CreateDepartment {
                name: body.name,
                code: body.code,
                description: body.description,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok_with_message(
        department,
        "Department created",
    )))
}

/// PUT /api/admin/departments/{id}
pub async fn update_department(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateDepartmentBody>,
) -> Result<Json<ApiResponse<Department>>, ApiError> {
    require_admin(&state, &auth)?;

    let department = state
        .department_service
        .update_department(
            &auth,
            UpdateDepartment {
                id,
                name: body.name,
                code: body.code,
                description: body.description,
                is_active: body.is_active,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok_with_message(
        department,
        "Department updated",
    )))
}

/// DELETE /api/admin/departments/{id}
pub async fn delete_department(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    require_admin(&state, &auth)?;

    state.department_service.delete_department(&auth, id).await?;
    Ok(Json(ApiResponse::ok_with_message(
        MessageResponse {
            message: "Department deleted".to_string(),
        },
        "Department deleted",
    )))
}

/// GET /api/admin/departments/unassigned-directors
///
/// Only directors with no department are offered for assignment.
pub async fn unassigned_directors(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, ApiError> {
    require_admin(&state, &auth)?;

    let directors = state.department_service.unassigned_directors().await?;
    Ok(Json(ApiResponse::ok(
        directors.into_iter().map(UserResponse::from).collect(),
    )))
}

/// PUT /api/admin/departments/{id}/director
pub async fn assign_director(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<AssignDirectorBody>,
) -> Result<Json<ApiResponse<Department>>, ApiError> {
    require_admin(&state, &auth)?;

    let department = match body.director_id {
        Some(director_id) => {
            state
                .department_service
                .assign_director(&auth, id, director_id)
                .await?
        }
        None => state.department_service.unassign_director(&auth, id).await?,
    };

    Ok(Json(ApiResponse::ok_with_message(
        department,
        "Director assignment updated",
    )))
}
