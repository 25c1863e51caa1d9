//! Report handlers.

use axum::Json;
use axum::extract::{Query, State};

use docuflow_core::types::response::ApiResponse;
use docuflow_entity::user::UserRole;
use docuflow_service::report::SummaryReport;

use crate::dto::request::ReportQuery;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::middleware::rbac::require_roles;
use crate::state::AppState;

/// GET /api/reports/summary
///
/// Produces the aggregated data an exporter renders into a PDF or
/// spreadsheet: summary counts, per-department table, status distribution.
pub async fn summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ApiResponse<SummaryReport>>, ApiError> {
    require_roles(&state, &auth, &[UserRole::Admin, UserRole::Director])?;

    let report = state
        .report_service
        .generate_summary(query.from, query.to)
        .await?;

    Ok(Json(ApiResponse::ok(report)))
}
