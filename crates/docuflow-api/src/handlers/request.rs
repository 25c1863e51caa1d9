//! Approval request handlers — creation, inbox, and actions.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use docuflow_core::types::pagination::PageResponse;
use docuflow_core::types::response::ApiResponse;
use docuflow_entity::request::model::{ApprovalRequest, CreateApprovalRequest};

use crate::dto::request::{CreateRequestBody, RequestActionBody};
use crate::error::ApiError;
use crate::extractors::{AuthUser, Pagination};
use crate::middleware::rbac::require_approver;
use crate::state::AppState;

/// GET /api/requests
pub async fn list_requests(
    State(state): State<AppState>,
    auth: AuthUser,
    Pagination(page): Pagination,
) -> Result<Json<ApiResponse<PageResponse<ApprovalRequest>>>, ApiError> {
    let requests = state.request_service.list_mine(&auth, page).await?;
    Ok(Json(ApiResponse::ok(requests)))
}

/// GET /api/requests/{id}
pub async fn get_request(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ApprovalRequest>>, ApiError> {
    let request = state.request_service.get_request(id).await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// POST /api/requests
pub async fn create_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateRequestBody>,
) -> Result<Json<ApiResponse<ApprovalRequest>>, ApiError> {
    let request = state
        .request_service
        .create_request(
            &auth,
            CreateApprovalRequest {
                title: body.title,
                description: body.description,
                target_department_id: body.target_department_id,
                assigned_director_id: body.assigned_director_id,
                priority: body.priority,
                category: body.category,
                created_by: auth.user_id,
                attachments: body.attachments,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok_with_message(
        request,
        "Request submitted",
    )))
}

/// GET /api/requests/inbox
///
/// The caller's pending working set. A successful action on an item
/// removes it from this list; a failed action leaves the list unchanged.
pub async fn inbox(
    State(state): State<AppState>,
    auth: AuthUser,
    Pagination(page): Pagination,
) -> Result<Json<ApiResponse<PageResponse<ApprovalRequest>>>, ApiError> {
    require_approver(&state, &auth)?;

    let requests = state.request_service.inbox(&auth, page).await?;
    Ok(Json(ApiResponse::ok(requests)))
}

/// POST /api/requests/{id}/action
///
/// Comment rules: reject, sendback, and signature require a non-empty
/// comment; approve does not.
pub async fn act_on_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<RequestActionBody>,
) -> Result<Json<ApiResponse<ApprovalRequest>>, ApiError> {
    require_approver(&state, &auth)?;

    let request = state
        .request_service
        .act(&auth, id, body.action, body.comment.as_deref())
        .await?;

    Ok(Json(ApiResponse::ok_with_message(
        request,
        "Action recorded",
    )))
}
