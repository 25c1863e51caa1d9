//! Integration tests for notification preference persistence.

mod helpers;

use http::StatusCode;

use docuflow_entity::user::UserRole;

#[tokio::test]
async fn test_preferences_round_trip() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("prefs@example.com", "password123", UserRole::Admin, None)
        .await;
    let token = app.login("prefs@example.com", "password123").await;

    let preferences = serde_json::json!({
        "file": { "enabled": false, "email": true },
        "request": { "enabled": true, "email": false },
        "session": { "enabled": true, "email": false },
        "system": { "enabled": false, "email": false },
    });

    let save = app
        .request(
            "PUT",
            "/api/notifications/preferences",
            Some(serde_json::json!({ "preferences": preferences })),
            Some(&token),
        )
        .await;
    assert_eq!(save.status, StatusCode::OK);

    // A fresh load yields exactly the object that was saved.
    let load = app
        .request("GET", "/api/notifications/preferences", None, Some(&token))
        .await;
    assert_eq!(load.status, StatusCode::OK);
    assert_eq!(load.body["data"]["preferences"], preferences);
}

#[tokio::test]
async fn test_defaults_before_first_save() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("fresh@example.com", "password123", UserRole::Admin, None)
        .await;
    let token = app.login("fresh@example.com", "password123").await;

    let load = app
        .request("GET", "/api/notifications/preferences", None, Some(&token))
        .await;

    assert_eq!(load.status, StatusCode::OK);
    assert_eq!(load.body["data"]["preferences"]["file"]["enabled"], true);
}

#[tokio::test]
async fn test_non_object_preferences_rejected() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("invalid@example.com", "password123", UserRole::Admin, None)
        .await;
    let token = app.login("invalid@example.com", "password123").await;

    let save = app
        .request(
            "PUT",
            "/api/notifications/preferences",
            Some(serde_json::json!({ "preferences": ["not", "an", "object"] })),
            Some(&token),
        )
        .await;

    assert_eq!(save.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_disabled_category_suppresses_delivery() {
    let app = helpers::TestApp::new().await;
    let dept = app.create_test_department("Ops", "OPS").await;
    app.create_test_user(
        "muted@example.com",
        "password123",
        UserRole::Department,
        Some(dept),
    )
    .await;
    app.create_test_user(
        "sharer@example.com",
        "password123",
        UserRole::Department,
        Some(dept),
    )
    .await;

    let muted_token = app.login("muted@example.com", "password123").await;
    let sharer_token = app.login("sharer@example.com", "password123").await;

    // Mute file notifications for the recipient.
    app.request(
        "PUT",
        "/api/notifications/preferences",
        Some(serde_json::json!({
            "preferences": { "file": { "enabled": false, "email": false } }
        })),
        Some(&muted_token),
    )
    .await;

    // Share a file directly with the muted user.
    let muted_id: uuid::Uuid =
        sqlx::query_scalar("SELECT id FROM users WHERE email = 'muted@example.com'")
            .fetch_one(&app.db_pool)
            .await
            .unwrap();

    let create = app
        .request(
            "POST",
            "/api/files",
            Some(serde_json::json!({ "title": "Quiet memo" })),
            Some(&sharer_token),
        )
        .await;
    let file_id = create.body["data"]["id"].as_str().unwrap().to_string();

    app.request(
        "POST",
        "/api/files/share",
        Some(serde_json::json!({
            "file_ids": [file_id],
            "targets": [{ "kind": "user", "id": muted_id }],
        })),
        Some(&sharer_token),
    )
    .await;

    let notifications = app
        .request("GET", "/api/notifications", None, Some(&muted_token))
        .await;
    assert_eq!(
        notifications.body["data"]["items"].as_array().unwrap().len(),
        0
    );
}
