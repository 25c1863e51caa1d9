//! DocuFlow Server — document and approval workflow management platform.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use docuflow_core::config::AppConfig;
use docuflow_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("DOCUFLOW_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());

    let env = std::env::var("DOCUFLOW_ENV").unwrap_or_else(|_| "development".to_string());
    let env_config_path = format!("config/{env}.toml");

    AppConfig::load_layered(&config_path, Some(&env_config_path))
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting DocuFlow v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    let db = docuflow_database::DatabasePool::connect(&config.database).await?;
    docuflow_database::migration::run_migrations(db.pool()).await?;
    let db_pool = db.into_pool();

    // ── Repositories ─────────────────────────────────────────────
    let user_repo = Arc::new(docuflow_database::repositories::UserRepository::new(
        db_pool.clone(),
    ));
    let department_repo = Arc::new(docuflow_database::repositories::DepartmentRepository::new(
        db_pool.clone(),
    ));
    let file_repo = Arc::new(docuflow_database::repositories::FileRepository::new(
        db_pool.clone(),
    ));
    let request_repo = Arc::new(docuflow_database::repositories::RequestRepository::new(
        db_pool.clone(),
    ));
    let session_repo = Arc::new(docuflow_database::repositories::SessionRepository::new(
        db_pool.clone(),
    ));
    let notification_repo = Arc::new(docuflow_database::repositories::NotificationRepository::new(
        db_pool.clone(),
    ));
    let audit_repo = Arc::new(docuflow_database::repositories::AuditLogRepository::new(
        db_pool.clone(),
    ));

    // ── Auth ─────────────────────────────────────────────────────
    let password_hasher = Arc::new(docuflow_auth::password::PasswordHasher::new());
    let password_validator = Arc::new(docuflow_auth::password::PasswordValidator::new(
        &config.auth,
    ));
    let jwt_encoder = Arc::new(docuflow_auth::jwt::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(docuflow_auth::jwt::JwtDecoder::new(&config.auth));
    let session_store = Arc::new(docuflow_auth::session::SessionStore::new(
        Arc::clone(&session_repo),
        config.session.clone(),
    ));
    let session_manager = Arc::new(docuflow_auth::session::SessionManager::new(
        Arc::clone(&jwt_encoder),
        Arc::clone(&jwt_decoder),
        Arc::clone(&session_store),
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
    ));

    // ── Services ─────────────────────────────────────────────────
    let notification_service = Arc::new(docuflow_service::notification::NotificationService::new(
        Arc::clone(&notification_repo),
    ));
    let user_service = Arc::new(docuflow_service::user::UserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&audit_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&password_validator),
    ));
    let department_service = Arc::new(docuflow_service::department::DepartmentService::new(
        Arc::clone(&department_repo),
        Arc::clone(&user_repo),
        Arc::clone(&audit_repo),
    ));
    let file_service = Arc::new(docuflow_service::file::FileService::new(
        Arc::clone(&file_repo),
        Arc::clone(&user_repo),
        Arc::clone(&audit_repo),
        Arc::clone(&notification_service),
    ));
    let request_service = Arc::new(docuflow_service::request::RequestService::new(
        Arc::clone(&request_repo),
        Arc::clone(&department_repo),
        Arc::clone(&user_repo),
        Arc::clone(&audit_repo),
        Arc::clone(&notification_service),
    ));
    let report_service = Arc::new(docuflow_service::report::ReportService::new(
        Arc::clone(&user_repo),
        Arc::clone(&department_repo),
        Arc::clone(&file_repo),
        Arc::clone(&request_repo),
        Arc::clone(&audit_repo),
    ));

    // ── Background session cleanup ───────────────────────────────
    spawn_session_cleanup(Arc::clone(&session_repo), &config);

    // ── HTTP server ──────────────────────────────────────────────
    let state = docuflow_api::AppState {
        config: Arc::new(config.clone()),
        db_pool,
        jwt_encoder,
        jwt_decoder,
        password_hasher,
        session_manager,
        access_gate: docuflow_auth::gate::AccessGate::new(),
        user_repo,
        audit_repo,
        user_service,
        department_service,
        file_service,
        request_service,
        notification_service,
        report_service,
    };

    let router = docuflow_api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Periodically terminates expired sessions.
fn spawn_session_cleanup(
    session_repo: Arc<docuflow_database::repositories::SessionRepository>,
    config: &AppConfig,
) {
    let interval_minutes = config.session.cleanup_interval_minutes.max(1);
    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(std::time::Duration::from_secs(interval_minutes * 60));
        loop {
            interval.tick().await;
            match session_repo.cleanup_expired().await {
                Ok(0) => {}
                Ok(count) => tracing::info!(count, "Expired sessions cleaned up"),
                Err(e) => tracing::error!(error = %e, "Session cleanup failed"),
            }
        }
    });
}

/// Resolves when SIGINT or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
