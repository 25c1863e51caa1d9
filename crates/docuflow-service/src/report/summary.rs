//! Summary report generation.
//!
//! Produces the data fields downstream exporters render into PDF or
//! spreadsheet documents: header, period, summary counts, a
//! per-department table, and a status distribution. The field set is the
//! compatibility surface; byte-exact layout is the exporter's concern.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use docuflow_core::error::AppError;
use docuflow_core::types::pagination::PageRequest;
use docuflow_database::repositories::audit::AuditLogRepository;
use docuflow_database::repositories::department::DepartmentRepository;
use docuflow_database::repositories::file::FileRepository;
use docuflow_database::repositories::request::RequestRepository;
use docuflow_database::repositories::user::UserRepository;

/// Aggregated summary report.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SummaryReport {
    /// Report type identifier.
    pub report_type: String,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Period start (None = unbounded).
    pub period_start: Option<DateTime<Utc>>,
    /// Period end (None = unbounded).
    pub period_end: Option<DateTime<Utc>>,
    /// Total number of users.
    pub total_users: i64,
    /// Total number of files in the period.
    pub total_files: i64,
    /// Total number of requests in the period.
    pub total_requests: i64,
    /// Number of login events in the period.
    pub login_count: i64,
    /// Per-department counts.
    pub departments: Vec<DepartmentReportRow>,
    /// File counts per status (lowercase status keys).
    pub file_status_distribution: HashMap<String, i64>,
    /// Request counts per status (lowercase status keys).
    pub request_status_distribution: HashMap<String, i64>,
}

/// One row of the per-department table.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DepartmentReportRow {
    /// Department ID.
    pub department_id: Uuid,
    /// Department name.
    pub name: String,
    /// Department code.
    pub code: String,
    /// Files created by members of this department in the period.
    pub file_count: i64,
    /// Requests targeting this department in the period.
    pub request_count: i64,
}

/// Generates summary reports across the whole system.
#[derive(Debug, Clone)]
pub struct ReportService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Department repository.
    department_repo: Arc<DepartmentRepository>,
    /// File repository.
    file_repo: Arc<FileRepository>,
    /// Request repository.
    request_repo: Arc<RequestRepository>,
    /// Audit log repository.
    audit_repo: Arc<AuditLogRepository>,
}

impl ReportService {
    /// Creates a new report service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        department_repo: Arc<DepartmentRepository>,
        file_repo: Arc<FileRepository>,
        request_repo: Arc<RequestRepository>,
        audit_repo: Arc<AuditLogRepository>,
    ) -> Self {
        Self {
            user_repo,
            department_repo,
            file_repo,
            request_repo,
            audit_repo,
        }
    }

    /// Generates a summary report for the given period.
    pub async fn generate_summary(
        &self,
        period_start: Option<DateTime<Utc>>,
        period_end: Option<DateTime<Utc>>,
    ) -> Result<SummaryReport, AppError> {
        let total_users = self.user_repo.count_all().await?;

        let file_statuses = self.file_repo.count_by_status(period_start, period_end).await?;
        let request_statuses = self
            .request_repo
            .count_by_status(period_start, period_end)
            .await?;

        let total_files: i64 = file_statuses.iter().map(|(_, count)| count).sum();
        let total_requests: i64 = request_statuses.iter().map(|(_, count)| count).sum();

        let login_count = self
            .audit_repo
            .count_actions("session.login", period_start, period_end)
            .await?;

        let files_by_department: HashMap<Uuid, i64> = self
            .file_repo
            .count_by_department(period_start, period_end)
            .await?
            .into_iter()
            .collect();
        let requests_by_department: HashMap<Uuid, i64> = self
            .request_repo
            .count_by_department(period_start, period_end)
            .await?
            .into_iter()
            .collect();

        // Departments are few; one page covers the table.
        let departments = self
            .department_repo
            .find_all(&PageRequest::new(1, 100))
            .await?
            .items
            .into_iter()
            .map(|d| DepartmentReportRow {
                file_count: files_by_department.get(&d.id).copied().unwrap_or(0),
                request_count: requests_by_department.get(&d.id).copied().unwrap_or(0),
                department_id: d.id,
                name: d.name,
                code: d.code,
            })
            .collect();

        Ok(SummaryReport {
            report_type: "summary".to_string(),
            generated_at: Utc::now(),
            period_start,
            period_end,
            total_users,
            total_files,
            total_requests,
            login_count,
            departments,
            file_status_distribution: file_statuses
                .into_iter()
                .map(|(status, count)| (status.to_string(), count))
                .collect(),
            request_status_distribution: request_statuses
                .into_iter()
                .map(|(status, count)| (status.to_string(), count))
                .collect(),
        })
    }
}
