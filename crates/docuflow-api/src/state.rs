//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use docuflow_auth::gate::AccessGate;
use docuflow_auth::jwt::decoder::JwtDecoder;
use docuflow_auth::jwt::encoder::JwtEncoder;
use docuflow_auth::password::hasher::PasswordHasher;
use docuflow_auth::session::manager::SessionManager;
use docuflow_core::config::AppConfig;

use docuflow_database::repositories::audit::AuditLogRepository;
use docuflow_database::repositories::user::UserRepository;

use docuflow_service::department::DepartmentService;
use docuflow_service::file::FileService;
use docuflow_service::notification::NotificationService;
use docuflow_service::report::ReportService;
use docuflow_service::request::RequestService;
use docuflow_service::user::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db_pool: PgPool,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token encoder
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Password hasher (Argon2)
    pub password_hasher: Arc<PasswordHasher>,
    /// Session lifecycle manager
    pub session_manager: Arc<SessionManager>,
    /// Role and route gate
    pub access_gate: AccessGate,

    // ── Repositories used directly by handlers ───────────────
    /// User repository
    pub user_repo: Arc<UserRepository>,
    /// Audit log repository
    pub audit_repo: Arc<AuditLogRepository>,

    // ── Services ─────────────────────────────────────────────
    /// User management service
    pub user_service: Arc<UserService>,
    /// Department management service
    pub department_service: Arc<DepartmentService>,
    /// File workflow service
    pub file_service: Arc<FileService>,
    /// Approval request service
    pub request_service: Arc<RequestService>,
    /// Notification service
    pub notification_service: Arc<NotificationService>,
    /// Report service
    pub report_service: Arc<ReportService>,
}
