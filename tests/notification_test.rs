//! Integration tests for the notification dashboard endpoints.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::TestApp;
use wardlink_entity::account::AccountRole;

#[tokio::test]
async fn test_request_creates_unread_notification_for_guardian() {
    let app = TestApp::new();
    let (guardian, guardian_token) = app.seed("mom", "555-0100", AccountRole::Guardian).await;
    let (dependent, dep_token) = app.seed("kid", "555-0101", AccountRole::Dependent).await;

    app.request(
        "POST",
        "/api/link-requests",
        Some(json!({ "guardian_phone_number": "555-0100" })),
        Some(&dep_token),
    )
    .await;

    let response = app
        .request("GET", "/api/notifications", None, Some(&guardian_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let items = response.body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["message"], "kid has requested to link with you.");
    assert_eq!(items[0]["is_read"], false);
    assert_eq!(items[0]["guardian_id"], guardian.id.to_string());
    assert_eq!(items[0]["dependent_id"], dependent.id.to_string());

    let response = app
        .request(
            "GET",
            "/api/notifications/unread-count",
            None,
            Some(&guardian_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["count"], 1);
}

#[tokio::test]
async fn test_accept_notifies_dependent() {
    let app = TestApp::new();
    let (_, guardian_token) = app.seed("mom", "555-0100", AccountRole::Guardian).await;
    let (_, dep_token) = app.seed("kid", "555-0101", AccountRole::Dependent).await;

    let response = app
        .request(
            "POST",
            "/api/link-requests",
            Some(json!({ "guardian_phone_number": "555-0100" })),
            Some(&dep_token),
        )
        .await;
    let request_id = response.body["data"]["id"].as_str().unwrap().to_string();

    app.request(
        "POST",
        &format!("/api/link-requests/{request_id}/decision"),
        Some(json!({ "decision": "accept" })),
        Some(&guardian_token),
    )
    .await;

    let response = app
        .request("GET", "/api/notifications", None, Some(&dep_token))
        .await;
    let items = response.body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["message"], "mom accepted your link request.");
}

#[tokio::test]
async fn test_reject_stays_silent_toward_dependent() {
    let app = TestApp::new();
    let (_, guardian_token) = app.seed("mom", "555-0100", AccountRole::Guardian).await;
    let (_, dep_token) = app.seed("kid", "555-0101", AccountRole::Dependent).await;

    let response = app
        .request(
            "POST",
            "/api/link-requests",
            Some(json!({ "guardian_phone_number": "555-0100" })),
            Some(&dep_token),
        )
        .await;
    let request_id = response.body["data"]["id"].as_str().unwrap().to_string();

    app.request(
        "POST",
        &format!("/api/link-requests/{request_id}/decision"),
        Some(json!({ "decision": "reject" })),
        Some(&guardian_token),
    )
    .await;

    let response = app
        .request("GET", "/api/notifications", None, Some(&dep_token))
        .await;
    assert!(response.body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_mark_read_is_idempotent() {
    let app = TestApp::new();
    let (_, guardian_token) = app.seed("mom", "555-0100", AccountRole::Guardian).await;
    let (_, dep_token) = app.seed("kid", "555-0101", AccountRole::Dependent).await;

    app.request(
        "POST",
        "/api/link-requests",
        Some(json!({ "guardian_phone_number": "555-0100" })),
        Some(&dep_token),
    )
    .await;

    let response = app
        .request("GET", "/api/notifications", None, Some(&guardian_token))
        .await;
    let id = response.body["data"][0]["id"].as_str().unwrap().to_string();

    let path = format!("/api/notifications/{id}/read");
    for _ in 0..2 {
        let response = app.request("POST", &path, None, Some(&guardian_token)).await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    }

    let response = app
        .request(
            "GET",
            "/api/notifications/unread-count",
            None,
            Some(&guardian_token),
        )
        .await;
    assert_eq!(response.body["data"]["count"], 0);
}

#[tokio::test]
async fn test_mark_read_rejects_non_party() {
    let app = TestApp::new();
    let (_, guardian_token) = app.seed("mom", "555-0100", AccountRole::Guardian).await;
    let (_, dep_token) = app.seed("kid", "555-0101", AccountRole::Dependent).await;
    let (_, outsider_token) = app.seed("other", "555-0102", AccountRole::Dependent).await;

    app.request(
        "POST",
        "/api/link-requests",
        Some(json!({ "guardian_phone_number": "555-0100" })),
        Some(&dep_token),
    )
    .await;

    let response = app
        .request("GET", "/api/notifications", None, Some(&guardian_token))
        .await;
    let id = response.body["data"][0]["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "POST",
            &format!("/api/notifications/{id}/read"),
            None,
            Some(&outsider_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "NOT_AUTHORIZED");
}

#[tokio::test]
async fn test_health_endpoint_is_open() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
}
