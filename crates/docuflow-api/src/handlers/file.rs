//! Document file handlers — drafts, sharing, and approval decisions.

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;
use uuid::Uuid;

use docuflow_core::types::pagination::PageResponse;
use docuflow_core::types::response::ApiResponse;
use docuflow_entity::file::model::{CreateDocumentFile, DocumentFile};
use docuflow_entity::file::share::FileShare;
use docuflow_service::file::ShareFilesRequest;

use crate::dto::request::{CreateFileBody, FileDecisionBody, ShareFilesBody};
use crate::error::ApiError;
use crate::extractors::{AuthUser, Pagination};
use crate::middleware::rbac::require_approver;
use crate::state::AppState;

/// A file together with its share entries.
#[derive(Debug, Clone, Serialize)]
pub struct FileDetail {
    /// The file row.
    #[serde(flatten)]
    pub file: DocumentFile,
    /// Share entries in creation order.
    pub shared_with: Vec<FileShare>,
}

/// GET /api/files
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
    Pagination(page): Pagination,
) -> Result<Json<ApiResponse<PageResponse<DocumentFile>>>, ApiError> {
    let files = state.file_service.list_mine(&auth, page).await?;
    Ok(Json(ApiResponse::ok(files)))
}

/// GET /api/files/{id}
pub async fn get_file(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<FileDetail>>, ApiError> {
    let (file, shared_with) = state.file_service.get_file(id).await?;
    Ok(Json(ApiResponse::ok(FileDetail { file, shared_with })))
}

/// POST /api/files
pub async fn create_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateFileBody>,
) -> Result<Json<ApiResponse<DocumentFile>>, ApiError> {
    let file = state
        .file_service
        .create_draft(
            &auth,
            CreateDocumentFile {
                title: body.title,
                description: body.description,
                category: body.category,
                created_by: auth.user_id,
                attachment_name: body.attachment_name,
                attachment_url: body.attachment_url,
                attachment_size: body.attachment_size,
                requires_signature: body.requires_signature,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok_with_message(file, "File created")))
}

/// POST /api/files/share
///
/// Fails validation — with no write issued — unless at least one file and
/// at least one target are selected.
pub async fn share_files(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<ShareFilesBody>,
) -> Result<Json<ApiResponse<Vec<DocumentFile>>>, ApiError> {
    let shared = state
        .file_service
        .share_files(
            &auth,
            ShareFilesRequest {
                file_ids: body.file_ids,
                targets: body.targets,
                permission: body.permission,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok_with_message(shared, "Files shared")))
}

/// POST /api/files/{id}/action
pub async fn decide_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<FileDecisionBody>,
) -> Result<Json<ApiResponse<DocumentFile>>, ApiError> {
    require_approver(&state, &auth)?;

    let file = state
        .file_service
        .decide(&auth, id, body.decision, body.comment.as_deref())
        .await?;

    Ok(Json(ApiResponse::ok_with_message(
        file,
        "Decision recorded",
    )))
}

/// POST /api/files/{id}/resubmit
pub async fn resubmit_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DocumentFile>>, ApiError> {
    let file = state.file_service.resubmit(&auth, id).await?;
    Ok(Json(ApiResponse::ok_with_message(file, "File resubmitted")))
}

/// POST /api/files/{id}/publish
pub async fn publish_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DocumentFile>>, ApiError> {
    require_approver(&state, &auth)?;

    let file = state.file_service.publish(&auth, id).await?;
    Ok(Json(ApiResponse::ok_with_message(file, "File published")))
}
