//! Integration tests for the authentication flow.

mod helpers;

use http::StatusCode;

use docuflow_entity::user::UserRole;

#[tokio::test]
async fn test_login_success() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("login@example.com", "password123", UserRole::Admin, None)
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "login@example.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert!(response.body["data"]["access_token"].is_string());
    assert!(response.body["data"]["refresh_token"].is_string());
    assert_eq!(response.body["data"]["user"]["role"], "admin");
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("badpw@example.com", "password123", UserRole::Admin, None)
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "badpw@example.com",
                "password": "wrongpassword",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["success"], false);
}

#[tokio::test]
async fn test_login_unknown_email_is_indistinguishable() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "nobody@example.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_deactivated_account_cannot_login() {
    let app = helpers::TestApp::new().await;
    let user_id = app
        .create_test_user("inactive@example.com", "password123", UserRole::Admin, None)
        .await;
    sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1")
        .bind(user_id)
        .execute(&app.db_pool)
        .await
        .unwrap();

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "inactive@example.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_round_trip() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("me@example.com", "password123", UserRole::Admin, None)
        .await;
    let token = app.login("me@example.com", "password123").await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["email"], "me@example.com");
}

#[tokio::test]
async fn test_me_without_token() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/auth/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("logout@example.com", "password123", UserRole::Admin, None)
        .await;
    let token = app.login("logout@example.com", "password123").await;

    let first = app
        .request("POST", "/api/auth/logout", None, Some(&token))
        .await;
    assert_eq!(first.status, StatusCode::OK);

    // The session is terminated, so the token no longer validates; the
    // second call must not resurrect anything or flip server state.
    let second = app
        .request("POST", "/api/auth/logout", None, Some(&token))
        .await;
    assert_eq!(second.status, StatusCode::UNAUTHORIZED);

    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_invalid_after_logout() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("revoked@example.com", "password123", UserRole::Admin, None)
        .await;
    let token = app.login("revoked@example.com", "password123").await;

    app.request("POST", "/api/auth/logout", None, Some(&token))
        .await;

    let response = app
        .request("GET", "/api/requests", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
