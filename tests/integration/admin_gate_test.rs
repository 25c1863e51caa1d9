//! Integration tests for admin-only route gating.

mod helpers;

use http::StatusCode;

use docuflow_entity::user::UserRole;

#[tokio::test]
async fn test_admin_can_list_users() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("admin@example.com", "password123", UserRole::Admin, None)
        .await;
    let token = app.login("admin@example.com", "password123").await;

    let response = app
        .request("GET", "/api/admin/users", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
}

#[tokio::test]
async fn test_non_admin_is_rejected_before_any_listing() {
    let app = helpers::TestApp::new().await;
    let dept = app.create_test_department("Finance", "FIN").await;
    app.create_test_user(
        "user@example.com",
        "password123",
        UserRole::Department,
        Some(dept),
    )
    .await;
    let token = app.login("user@example.com", "password123").await;

    for path in [
        "/api/admin/users",
        "/api/admin/departments",
        "/api/admin/departments/unassigned-directors",
    ] {
        let response = app.request("GET", path, None, Some(&token)).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN, "path {path}");
        assert_eq!(response.body["success"], false);
        assert!(response.body["data"].is_null());
    }
}

#[tokio::test]
async fn test_director_cannot_create_users() {
    let app = helpers::TestApp::new().await;
    let dept = app.create_test_department("Legal", "LEG").await;
    app.create_test_user(
        "director@example.com",
        "password123",
        UserRole::Director,
        Some(dept),
    )
    .await;
    let token = app.login("director@example.com", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/admin/users",
            Some(serde_json::json!({
                "first_name": "New",
                "last_name": "Person",
                "email": "new@example.com",
                "password": "strong-enough-pw",
                "role": "department",
                "department_id": dept,
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unauthenticated_admin_access() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/admin/users", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
