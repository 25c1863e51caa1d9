//! Integration tests for the request inbox and action flow.

mod helpers;

use http::StatusCode;

use docuflow_entity::user::UserRole;

struct InboxSetup {
    app: helpers::TestApp,
    creator_token: String,
    director_token: String,
    department_id: uuid::Uuid,
}

async fn setup() -> InboxSetup {
    let app = helpers::TestApp::new().await;
    let department_id = app.create_test_department("Operations", "OPS").await;
    app.create_test_user(
        "requester@example.com",
        "password123",
        UserRole::Department,
        Some(department_id),
    )
    .await;
    let director_id = app
        .create_test_user(
            "opsdirector@example.com",
            "password123",
            UserRole::Director,
            Some(department_id),
        )
        .await;
    sqlx::query("UPDATE departments SET director_id = $1 WHERE id = $2")
        .bind(director_id)
        .bind(department_id)
        .execute(&app.db_pool)
        .await
        .unwrap();

    let creator_token = app.login("requester@example.com", "password123").await;
    let director_token = app.login("opsdirector@example.com", "password123").await;

    InboxSetup {
        app,
        creator_token,
        director_token,
        department_id,
    }
}

async fn submit_request(setup: &InboxSetup, title: &str) -> String {
    let response = setup
        .app
        .request(
            "POST",
            "/api/requests",
            Some(serde_json::json!({
                "title": title,
                "target_department_id": setup.department_id,
                "priority": "high",
            })),
            Some(&setup.creator_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    response.body["data"]["id"].as_str().unwrap().to_string()
}

async fn inbox_ids(setup: &InboxSetup) -> Vec<String> {
    let response = setup
        .app
        .request("GET", "/api/requests/inbox", None, Some(&setup.director_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    response.body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_pending_request_appears_in_inbox() {
    let setup = setup().await;
    let request_id = submit_request(&setup, "New laptop").await;

    let ids = inbox_ids(&setup).await;
    assert!(ids.contains(&request_id));
}

#[tokio::test]
async fn test_terminal_action_removes_from_inbox() {
    let setup = setup().await;
    let keep_id = submit_request(&setup, "Stays pending").await;
    let acted_id = submit_request(&setup, "Gets approved").await;

    let response = setup
        .app
        .request(
            "POST",
            &format!("/api/requests/{acted_id}/action"),
            Some(serde_json::json!({ "action": "approve" })),
            Some(&setup.director_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "approved");

    let ids = inbox_ids(&setup).await;
    assert!(!ids.contains(&acted_id));
    assert!(ids.contains(&keep_id));
}

#[tokio::test]
async fn test_reject_requires_comment() {
    let setup = setup().await;
    let request_id = submit_request(&setup, "Budget increase").await;

    for body in [
        serde_json::json!({ "action": "reject" }),
        serde_json::json!({ "action": "reject", "comment": "" }),
        serde_json::json!({ "action": "reject", "comment": "   " }),
    ] {
        let response = setup
            .app
            .request(
                "POST",
                &format!("/api/requests/{request_id}/action"),
                Some(body),
                Some(&setup.director_token),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }

    // A failed action leaves the item in the inbox.
    let ids = inbox_ids(&setup).await;
    assert!(ids.contains(&request_id));

    // With a comment the rejection goes through.
    let response = setup
        .app
        .request(
            "POST",
            &format!("/api/requests/{request_id}/action"),
            Some(serde_json::json!({ "action": "reject", "comment": "No budget this quarter" })),
            Some(&setup.director_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "rejected");
}

#[tokio::test]
async fn test_sendback_and_signature_require_comment_approve_does_not() {
    let setup = setup().await;

    for (action, needs_comment) in [
        ("sendback", true),
        ("signature", true),
        ("approve", false),
    ] {
        let request_id = submit_request(&setup, &format!("Case {action}")).await;
        let response = setup
            .app
            .request(
                "POST",
                &format!("/api/requests/{request_id}/action"),
                Some(serde_json::json!({ "action": action })),
                Some(&setup.director_token),
            )
            .await;

        if needs_comment {
            assert_eq!(response.status, StatusCode::BAD_REQUEST, "action {action}");
        } else {
            assert_eq!(response.status, StatusCode::OK, "action {action}");
        }
    }
}

#[tokio::test]
async fn test_double_action_conflicts() {
    let setup = setup().await;
    let request_id = submit_request(&setup, "One decision only").await;

    let first = setup
        .app
        .request(
            "POST",
            &format!("/api/requests/{request_id}/action"),
            Some(serde_json::json!({ "action": "approve" })),
            Some(&setup.director_token),
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);

    let second = setup
        .app
        .request(
            "POST",
            &format!("/api/requests/{request_id}/action"),
            Some(serde_json::json!({ "action": "reject", "comment": "too late" })),
            Some(&setup.director_token),
        )
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_creator_receives_notification_with_comment() {
    let setup = setup().await;
    let request_id = submit_request(&setup, "Notify me").await;

    setup
        .app
        .request(
            "POST",
            &format!("/api/requests/{request_id}/action"),
            Some(serde_json::json!({ "action": "sendback", "comment": "Add cost estimate" })),
            Some(&setup.director_token),
        )
        .await;

    let notifications = setup
        .app
        .request("GET", "/api/notifications", None, Some(&setup.creator_token))
        .await;
    assert_eq!(notifications.status, StatusCode::OK);
    let items = notifications.body["data"]["items"].as_array().unwrap();
    assert!(
        items
            .iter()
            .any(|n| n["body"].as_str().unwrap_or("").contains("Add cost estimate"))
    );
}
