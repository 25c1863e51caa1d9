//! Integration tests for department management and director assignment.

mod helpers;

use http::StatusCode;

use docuflow_entity::user::UserRole;

#[tokio::test]
async fn test_create_department_requires_unique_code() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("admin@example.com", "password123", UserRole::Admin, None)
        .await;
    let token = app.login("admin@example.com", "password123").await;

    let first = app
        .request(
            "POST",
            "/api/admin/departments",
            Some(serde_json::json!({ "name": "Finance", "code": "fin" })),
            Some(&token),
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);
    // Codes are stored uppercased.
    assert_eq!(first.body["data"]["code"], "FIN");

    let duplicate = app
        .request(
            "POST",
            "/api/admin/departments",
            Some(serde_json::json!({ "name": "Financial Ops", "code": "FIN" })),
            Some(&token),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_unassigned_directors_shrink_as_assignments_happen() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("admin@example.com", "password123", UserRole::Admin, None)
        .await;
    let token = app.login("admin@example.com", "password123").await;

    let dept_a = app.create_test_department("Finance", "FIN").await;
    let dept_b = app.create_test_department("Legal", "LEG").await;

    // Three directors, none assigned yet.
    let director_1 = app
        .create_test_user("d1@example.com", "password123", UserRole::Director, None)
        .await;
    app.create_test_user("d2@example.com", "password123", UserRole::Director, None)
        .await;
    app.create_test_user("d3@example.com", "password123", UserRole::Director, None)
        .await;

    let unassigned = app
        .request(
            "GET",
            "/api/admin/departments/unassigned-directors",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(unassigned.body["data"].as_array().unwrap().len(), 3);

    // Assign one: the pool shrinks to N - M = 2.
    let assign = app
        .request(
            "PUT",
            &format!("/api/admin/departments/{dept_a}/director"),
            Some(serde_json::json!({ "director_id": director_1 })),
            Some(&token),
        )
        .await;
    assert_eq!(assign.status, StatusCode::OK);

    let unassigned = app
        .request(
            "GET",
            "/api/admin/departments/unassigned-directors",
            None,
            Some(&token),
        )
        .await;
    let remaining = unassigned.body["data"].as_array().unwrap();
    assert_eq!(remaining.len(), 2);
    assert!(
        remaining
            .iter()
            .all(|d| d["id"].as_str().unwrap() != director_1.to_string())
    );

    // The same director cannot take a second department.
    let conflict = app
        .request(
            "PUT",
            &format!("/api/admin/departments/{dept_b}/director"),
            Some(serde_json::json!({ "director_id": director_1 })),
            Some(&token),
        )
        .await;
    assert_eq!(conflict.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_assigning_non_director_fails_validation() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("admin@example.com", "password123", UserRole::Admin, None)
        .await;
    let token = app.login("admin@example.com", "password123").await;

    let dept = app.create_test_department("Finance", "FIN").await;
    let regular = app
        .create_test_user(
            "regular@example.com",
            "password123",
            UserRole::Department,
            Some(dept),
        )
        .await;

    let response = app
        .request(
            "PUT",
            &format!("/api/admin/departments/{dept}/director"),
            Some(serde_json::json!({ "director_id": regular })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_user_creation_requires_department_for_scoped_roles() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("admin@example.com", "password123", UserRole::Admin, None)
        .await;
    let token = app.login("admin@example.com", "password123").await;

    // A department user without a department is refused.
    let response = app
        .request(
            "POST",
            "/api/admin/users",
            Some(serde_json::json!({
                "first_name": "No",
                "last_name": "Department",
                "email": "nodept@example.com",
                "password": "perfectly-fine-password",
                "role": "department",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    // An admin without a department is fine.
    let response = app
        .request(
            "POST",
            "/api/admin/users",
            Some(serde_json::json!({
                "first_name": "Second",
                "last_name": "Admin",
                "email": "admin2@example.com",
                "password": "perfectly-fine-password",
                "role": "admin",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_department_with_members_conflicts() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("admin@example.com", "password123", UserRole::Admin, None)
        .await;
    let token = app.login("admin@example.com", "password123").await;

    let dept = app.create_test_department("Finance", "FIN").await;
    app.create_test_user(
        "member@example.com",
        "password123",
        UserRole::Department,
        Some(dept),
    )
    .await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/admin/departments/{dept}"),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}
