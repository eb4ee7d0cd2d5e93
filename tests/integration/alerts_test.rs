//! Integration tests for the alert inbox.

use chrono::{Duration, Utc};
use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use meditrek_service::AlertExpirySweeper;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_create_alert_defaults() {
    let app = TestApp::new();
    let token = app.user("Ada").await;

    let response = app
        .request(
            "POST",
            "/api/alerts",
            Some(json!({ "title": "  Check-up due  ", "message": "Book your annual check-up" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["message"], "Alert created successfully");
    let alert = &response.body["alert"];
    assert_eq!(alert["title"], "Check-up due");
    assert_eq!(alert["type"], "info");
    assert_eq!(alert["priority"], "medium");
    assert_eq!(alert["isRead"], false);
    assert_eq!(alert["isDismissed"], false);
    assert_eq!(alert["isActive"], true);
}

#[tokio::test]
async fn test_invalid_type_is_rejected_and_not_persisted() {
    let app = TestApp::new();
    let token = app.user("Ada").await;

    let response = app
        .request(
            "POST",
            "/api/alerts",
            Some(json!({ "title": "T", "message": "M", "type": "bogus" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["details"]["type"].is_array());

    let list = app.request("GET", "/api/alerts", None, Some(&token)).await;
    assert_eq!(list.body["pagination"]["totalItems"], 0);
}

#[tokio::test]
async fn test_missing_fields_are_reported_per_field() {
    let app = TestApp::new();
    let token = app.user("Ada").await;

    let response = app
        .request(
            "POST",
            "/api/alerts",
            Some(json!({ "priority": "urgent" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let details = &response.body["details"];
    assert!(details["title"].is_array());
    assert!(details["message"].is_array());
    assert!(details["priority"].is_array());
}

#[tokio::test]
async fn test_unauthenticated_create_has_no_side_effect() {
    let app = TestApp::new();
    let token = app.user("Ada").await;

    let response = app
        .request(
            "POST",
            "/api/alerts",
            Some(json!({ "title": "T", "message": "M" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let list = app.request("GET", "/api/alerts", None, Some(&token)).await;
    assert_eq!(list.body["pagination"]["totalItems"], 0);
}

#[tokio::test]
async fn test_second_page_holds_items_eleven_to_twenty() {
    let app = TestApp::new();
    let token = app.user("Ada").await;

    for i in 1..=25 {
        app.create_alert(&token, json!({ "title": format!("Alert {i}"), "message": "m" }))
            .await;
    }

    let response = app
        .request("GET", "/api/alerts?page=2&limit=10", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let titles: Vec<&str> = response.body["alerts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap())
        .collect();
    let expected: Vec<String> = (6..=15).rev().map(|i| format!("Alert {i}")).collect();
    assert_eq!(titles, expected);

    let pagination = &response.body["pagination"];
    assert_eq!(pagination["currentPage"], 2);
    assert_eq!(pagination["totalPages"], 3);
    assert_eq!(pagination["totalItems"], 25);
    assert_eq!(pagination["hasNextPage"], true);
    assert_eq!(pagination["hasPrevPage"], true);
}

#[tokio::test]
async fn test_empty_inbox_pagination() {
    let app = TestApp::new();
    let token = app.user("Ada").await;

    let response = app.request("GET", "/api/alerts", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["alerts"], json!([]));
    assert_eq!(response.body["pagination"]["totalPages"], 0);
    assert_eq!(response.body["pagination"]["hasNextPage"], false);
    assert_eq!(response.body["pagination"]["hasPrevPage"], false);
}

#[tokio::test]
async fn test_list_filters() {
    let app = TestApp::new();
    let token = app.user("Ada").await;

    let first = app
        .create_alert(&token, json!({ "title": "A", "message": "m", "type": "warning", "priority": "high" }))
        .await;
    app.create_alert(&token, json!({ "title": "B", "message": "m", "type": "success" }))
        .await;

    let path = format!("/api/alerts/{}/read", first["id"].as_str().unwrap());
    app.request("PATCH", &path, None, Some(&token)).await;

    let read = app
        .request("GET", "/api/alerts?read=true", None, Some(&token))
        .await;
    assert_eq!(read.body["pagination"]["totalItems"], 1);
    assert_eq!(read.body["alerts"][0]["title"], "A");

    let success = app
        .request("GET", "/api/alerts?type=success", None, Some(&token))
        .await;
    assert_eq!(success.body["pagination"]["totalItems"], 1);
    assert_eq!(success.body["alerts"][0]["title"], "B");

    let high = app
        .request("GET", "/api/alerts?priority=high&read=false", None, Some(&token))
        .await;
    assert_eq!(high.body["pagination"]["totalItems"], 0);

    let bogus = app
        .request("GET", "/api/alerts?priority=urgent", None, Some(&token))
        .await;
    assert_eq!(bogus.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_alert_is_owner_scoped() {
    let app = TestApp::new();
    let ada = app.user("Ada").await;
    let bob = app.user("Bob").await;

    let alert = app
        .create_alert(&ada, json!({ "title": "Private", "message": "m" }))
        .await;
    let path = format!("/api/alerts/{}", alert["id"].as_str().unwrap());

    let own = app.request("GET", &path, None, Some(&ada)).await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.body["title"], "Private");
    assert_eq!(own.body["isActive"], true);

    let other = app.request("GET", &path, None, Some(&bob)).await;
    assert_eq!(other.status, StatusCode::NOT_FOUND);

    let dismiss = format!("{path}/dismiss");
    let other = app.request("PATCH", &dismiss, None, Some(&bob)).await;
    assert_eq!(other.status, StatusCode::NOT_FOUND);

    let missing = format!("/api/alerts/{}", Uuid::new_v4());
    let response = app.request("GET", &missing, None, Some(&ada)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Alert not found");

    let malformed = app
        .request("GET", "/api/alerts/not-a-uuid", None, Some(&ada))
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_read_and_dismiss_are_idempotent() {
    let app = TestApp::new();
    let token = app.user("Ada").await;

    let alert = app
        .create_alert(&token, json!({ "title": "T", "message": "M" }))
        .await;
    let id = alert["id"].as_str().unwrap();

    for _ in 0..2 {
        let response = app
            .request("PATCH", &format!("/api/alerts/{id}/read"), None, Some(&token))
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["message"], "Alert marked as read");
        assert_eq!(response.body["alert"]["isRead"], true);
    }

    for _ in 0..2 {
        let response = app
            .request("PATCH", &format!("/api/alerts/{id}/dismiss"), None, Some(&token))
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["alert"]["isDismissed"], true);
        assert_eq!(response.body["alert"]["isActive"], false);
    }
}

#[tokio::test]
async fn test_unread_count_excludes_read_and_dismissed() {
    let app = TestApp::new();
    let token = app.user("Ada").await;

    let mut ids = Vec::new();
    for i in 0..4 {
        let alert = app
            .create_alert(&token, json!({ "title": format!("T{i}"), "message": "M" }))
            .await;
        ids.push(alert["id"].as_str().unwrap().to_string());
    }
    app.request("PATCH", &format!("/api/alerts/{}/read", ids[0]), None, Some(&token))
        .await;
    app.request("PATCH", &format!("/api/alerts/{}/dismiss", ids[1]), None, Some(&token))
        .await;

    let response = app
        .request("GET", "/api/alerts/unread/count", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["unreadCount"], 2);
}

#[tokio::test]
async fn test_mark_all_read_only_touches_caller() {
    let app = TestApp::new();
    let ada = app.user("Ada").await;
    let bob = app.user("Bob").await;

    for i in 0..3 {
        app.create_alert(&ada, json!({ "title": format!("A{i}"), "message": "m" }))
            .await;
    }
    for i in 0..2 {
        app.create_alert(&bob, json!({ "title": format!("B{i}"), "message": "m" }))
            .await;
    }

    let response = app
        .request("PATCH", "/api/alerts/read-all", None, Some(&ada))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["updatedCount"], 3);

    let ada_count = app
        .request("GET", "/api/alerts/unread/count", None, Some(&ada))
        .await;
    assert_eq!(ada_count.body["unreadCount"], 0);

    let bob_count = app
        .request("GET", "/api/alerts/unread/count", None, Some(&bob))
        .await;
    assert_eq!(bob_count.body["unreadCount"], 2);

    let again = app
        .request("PATCH", "/api/alerts/read-all", None, Some(&ada))
        .await;
    assert_eq!(again.body["updatedCount"], 0);
}

#[tokio::test]
async fn test_expired_alerts_are_inactive_then_swept() {
    let app = TestApp::new();
    let token = app.user("Ada").await;

    let past = (Utc::now() - Duration::minutes(5)).to_rfc3339();
    let future = (Utc::now() + Duration::hours(1)).to_rfc3339();

    let expired = app
        .create_alert(&token, json!({ "title": "Old", "message": "m", "expiresAt": past }))
        .await;
    assert_eq!(expired["isActive"], false);

    let live = app
        .create_alert(&token, json!({ "title": "New", "message": "m", "expiresAt": future }))
        .await;
    assert_eq!(live["isActive"], true);

    let sweeper = AlertExpirySweeper::new(app.datastore.alerts.clone(), 60);
    let removed = sweeper.sweep(Utc::now()).await.unwrap();
    assert_eq!(removed, 1);

    let list = app.request("GET", "/api/alerts", None, Some(&token)).await;
    assert_eq!(list.body["pagination"]["totalItems"], 1);
    assert_eq!(list.body["alerts"][0]["title"], "New");

    let path = format!("/api/alerts/{}", expired["id"].as_str().unwrap());
    let gone = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_huge_page_number_returns_empty_page() {
    let app = TestApp::new();
    let token = app.user("Ada").await;
    app.create_alert(&token, json!({ "title": "Only", "message": "m" }))
        .await;

    let response = app
        .request(
            "GET",
            "/api/alerts?page=18446744073709551615&limit=10",
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["alerts"], json!([]));
    assert_eq!(response.body["pagination"]["totalItems"], 1);
    assert_eq!(response.body["pagination"]["hasNextPage"], false);
    assert_eq!(response.body["pagination"]["hasPrevPage"], true);
}
