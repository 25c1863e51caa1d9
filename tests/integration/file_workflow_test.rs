//! Integration tests for the file share and approval workflow.

mod helpers;

use http::StatusCode;

use docuflow_entity::user::UserRole;

async fn create_draft(app: &helpers::TestApp, token: &str, title: &str) -> String {
    let response = app
        .request(
            "POST",
            "/api/files",
            Some(serde_json::json!({ "title": title })),
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    response.body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_share_with_no_files_fails_validation() {
    let app = helpers::TestApp::new().await;
    let dept = app.create_test_department("Finance", "FIN").await;
    app.create_test_user(
        "creator@example.com",
        "password123",
        UserRole::Department,
        Some(dept),
    )
    .await;
    let token = app.login("creator@example.com", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/files/share",
            Some(serde_json::json!({
                "file_ids": [],
                "targets": [{ "kind": "department", "id": dept }],
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_share_with_no_targets_fails_validation() {
    let app = helpers::TestApp::new().await;
    let dept = app.create_test_department("Finance", "FIN").await;
    app.create_test_user(
        "creator2@example.com",
        "password123",
        UserRole::Department,
        Some(dept),
    )
    .await;
    let token = app.login("creator2@example.com", "password123").await;
    let file_id = create_draft(&app, &token, "Quarterly memo").await;

    let response = app
        .request(
            "POST",
            "/api/files/share",
            Some(serde_json::json!({
                "file_ids": [file_id.clone()],
                "targets": [],
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    // Validation failed before any write: the file is still a draft with
    // no share entries.
    let detail = app
        .request("GET", &format!("/api/files/{file_id}"), None, Some(&token))
        .await;
    assert_eq!(detail.body["data"]["status"], "draft");
    assert_eq!(detail.body["data"]["shared_with"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_share_moves_draft_to_pending() {
    let app = helpers::TestApp::new().await;
    let dept = app.create_test_department("Finance", "FIN").await;
    app.create_test_user(
        "creator3@example.com",
        "password123",
        UserRole::Department,
        Some(dept),
    )
    .await;
    let token = app.login("creator3@example.com", "password123").await;
    let file_id = create_draft(&app, &token, "Policy draft").await;

    let response = app
        .request(
            "POST",
            "/api/files/share",
            Some(serde_json::json!({
                "file_ids": [file_id.clone()],
                "targets": [{ "kind": "department", "id": dept }],
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"][0]["status"], "pending");

    // A pending file is no longer shareable.
    let again = app
        .request(
            "POST",
            "/api/files/share",
            Some(serde_json::json!({
                "file_ids": [file_id],
                "targets": [{ "kind": "department", "id": dept }],
            })),
            Some(&token),
        )
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_sent_back_file_reenters_draft() {
    let app = helpers::TestApp::new().await;
    let dept = app.create_test_department("Finance", "FIN").await;
    app.create_test_user(
        "creator4@example.com",
        "password123",
        UserRole::Department,
        Some(dept),
    )
    .await;
    app.create_test_user(
        "director4@example.com",
        "password123",
        UserRole::Director,
        Some(dept),
    )
    .await;

    let creator_token = app.login("creator4@example.com", "password123").await;
    let director_token = app.login("director4@example.com", "password123").await;

    let file_id = create_draft(&app, &creator_token, "Needs work").await;
    app.request(
        "POST",
        "/api/files/share",
        Some(serde_json::json!({
            "file_ids": [file_id.clone()],
            "targets": [{ "kind": "department", "id": dept }],
        })),
        Some(&creator_token),
    )
    .await;

    let decision = app
        .request(
            "POST",
            &format!("/api/files/{file_id}/action"),
            Some(serde_json::json!({ "decision": "send_back", "comment": "Fix section 2" })),
            Some(&director_token),
        )
        .await;
    assert_eq!(decision.status, StatusCode::OK);
    assert_eq!(decision.body["data"]["status"], "sent_back");

    let resubmit = app
        .request(
            "POST",
            &format!("/api/files/{file_id}/resubmit"),
            None,
            Some(&creator_token),
        )
        .await;
    assert_eq!(resubmit.status, StatusCode::OK);
    assert_eq!(resubmit.body["data"]["status"], "draft");
}

#[tokio::test]
async fn test_signature_required_blocks_approval() {
    let app = helpers::TestApp::new().await;
    let dept = app.create_test_department("Finance", "FIN").await;
    app.create_test_user(
        "creator5@example.com",
        "password123",
        UserRole::Department,
        Some(dept),
    )
    .await;
    app.create_test_user(
        "director5@example.com",
        "password123",
        UserRole::Director,
        Some(dept),
    )
    .await;

    let creator_token = app.login("creator5@example.com", "password123").await;
    let director_token = app.login("director5@example.com", "password123").await;

    let create = app
        .request(
            "POST",
            "/api/files",
            Some(serde_json::json!({ "title": "Contract", "requires_signature": true })),
            Some(&creator_token),
        )
        .await;
    let file_id = create.body["data"]["id"].as_str().unwrap().to_string();

    app.request(
        "POST",
        "/api/files/share",
        Some(serde_json::json!({
            "file_ids": [file_id.clone()],
            "targets": [{ "kind": "department", "id": dept }],
        })),
        Some(&creator_token),
    )
    .await;

    // Director has no stored signature: approval is refused.
    let blocked = app
        .request(
            "POST",
            &format!("/api/files/{file_id}/action"),
            Some(serde_json::json!({ "decision": "approve" })),
            Some(&director_token),
        )
        .await;
    assert_eq!(blocked.status, StatusCode::CONFLICT);

    // After saving a signature, approval goes through.
    app.request(
        "PUT",
        "/api/users/me/signature",
        Some(serde_json::json!({ "kind": "drawn", "data": "data:image/png;base64,AAAA" })),
        Some(&director_token),
    )
    .await;

    let approved = app
        .request(
            "POST",
            &format!("/api/files/{file_id}/action"),
            Some(serde_json::json!({ "decision": "approve" })),
            Some(&director_token),
        )
        .await;
    assert_eq!(approved.status, StatusCode::OK);
    assert_eq!(approved.body["data"]["status"], "approved");
}
