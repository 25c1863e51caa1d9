//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use docuflow_core::config::AppConfig;
use docuflow_entity::user::UserRole;

/// Test application context.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// Database pool for direct queries.
    pub db_pool: PgPool,
    /// Application config.
    pub config: AppConfig,
}

/// A decoded test response.
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Parsed JSON body.
    pub body: Value,
}

impl TestApp {
    /// Create a new test application against a clean database.
    pub async fn new() -> Self {
        let config =
            AppConfig::load("tests/fixtures/test_config.toml").expect("Failed to load test config");

        let db = docuflow_database::DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        docuflow_database::migration::run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");
        let db_pool = db.into_pool();

        Self::clean_database(&db_pool).await;

        let user_repo = Arc::new(docuflow_database::repositories::UserRepository::new(
            db_pool.clone(),
        ));
        let department_repo = Arc::new(
            docuflow_database::repositories::DepartmentRepository::new(db_pool.clone()),
        );
        let file_repo = Arc::new(docuflow_database::repositories::FileRepository::new(
            db_pool.clone(),
        ));
        let request_repo = Arc::new(docuflow_database::repositories::RequestRepository::new(
            db_pool.clone(),
        ));
        let session_repo = Arc::new(docuflow_database::repositories::SessionRepository::new(
            db_pool.clone(),
        ));
        let notification_repo = Arc::new(
            docuflow_database::repositories::NotificationRepository::new(db_pool.clone()),
        );
        let audit_repo = Arc::new(docuflow_database::repositories::AuditLogRepository::new(
            db_pool.clone(),
        ));

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

        let notification_service = Arc::new(
            docuflow_service::notification::NotificationService::new(Arc::clone(
                &notification_repo,
            )),
        );
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

        let state = docuflow_api::AppState {
            config: Arc::new(config.clone()),
            db_pool: db_pool.clone(),
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

        Self {
            router: docuflow_api::build_router(state),
            db_pool,
            config,
        }
    }

    /// Remove all rows between tests.
    async fn clean_database(pool: &PgPool) {
        for table in [
            "audit_log",
            "notification_preferences",
            "notifications",
            "requests",
            "file_shares",
            "files",
            "sessions",
            "users",
            "departments",
        ] {
            sqlx::query(&format!("TRUNCATE TABLE {table} CASCADE"))
                .execute(pool)
                .await
                .expect("Failed to truncate table");
        }
    }

    /// Issue a request against the router and decode the JSON body.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }

    /// Insert a user directly, bypassing the API.
    pub async fn create_test_user(
        &self,
        email: &str,
        password: &str,
        role: UserRole,
        department_id: Option<Uuid>,
    ) -> Uuid {
        let hasher = docuflow_auth::password::PasswordHasher::new();
        let hash = hasher.hash_password(password).unwrap();

        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO users (first_name, last_name, email, password_hash, role, department_id) \
             VALUES ('Test', 'User', $1, $2, $3, $4) RETURNING id",
        )
        .bind(email)
        .bind(&hash)
        .bind(role)
        .bind(department_id)
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to insert test user")
    }

    /// Insert a department directly.
    pub async fn create_test_department(&self, name: &str, code: &str) -> Uuid {
        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO departments (name, code) VALUES ($1, $2) RETURNING id",
        )
        .bind(name)
        .bind(code)
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to insert test department")
    }

    /// Log in through the API and return the access token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {:?}", response.body);
        response.body["data"]["access_token"]
            .as_str()
            .expect("No access token in login response")
            .to_string()
    }
}
