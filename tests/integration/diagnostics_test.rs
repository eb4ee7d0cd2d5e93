//! Integration tests for diagnostic test records.

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_create_defaults_to_pending() {
    let app = TestApp::new();
    let token = app.user("Ada").await;

    let test = app
        .create_test(
            &token,
            json!({ "name": "Blood Glucose Test", "result": "Normal - 95 mg/dL", "notes": "Fasting" }),
        )
        .await;

    assert_eq!(test["name"], "Blood Glucose Test");
    assert_eq!(test["status"], "pending");
    assert_eq!(test["notes"], "Fasting");
    assert!(test["date"].as_str().is_some());
    assert!(test["id"].as_str().is_some());
}

#[tokio::test]
async fn test_create_requires_name_and_result() {
    let app = TestApp::new();
    let token = app.user("Ada").await;

    let response = app
        .request(
            "POST",
            "/api/diagnostic-tests",
            Some(json!({ "name": "   " })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["details"]["name"].is_array());
    assert!(response.body["details"]["result"].is_array());
}

#[tokio::test]
async fn test_list_sorted_by_date_and_filtered() {
    let app = TestApp::new();
    let token = app.user("Ada").await;

    app.create_test(
        &token,
        json!({ "name": "Old", "result": "r", "date": "2024-01-15T00:00:00Z" }),
    )
    .await;
    let newest = app
        .create_test(
            &token,
            json!({ "name": "Newest", "result": "r", "date": "2024-03-01T00:00:00Z" }),
        )
        .await;
    app.create_test(
        &token,
        json!({ "name": "Middle", "result": "r", "date": "2024-02-01T00:00:00Z" }),
    )
    .await;

    let response = app
        .request("GET", "/api/diagnostic-tests", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<&str> = response.body["tests"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Newest", "Middle", "Old"]);
    assert_eq!(response.body["pagination"]["totalItems"], 3);

    let path = format!(
        "/api/diagnostic-tests/{}/status",
        newest["id"].as_str().unwrap()
    );
    app.request("PATCH", &path, Some(json!({ "status": "completed" })), Some(&token))
        .await;

    let completed = app
        .request("GET", "/api/diagnostic-tests?status=completed", None, Some(&token))
        .await;
    assert_eq!(completed.body["pagination"]["totalItems"], 1);
    assert_eq!(completed.body["tests"][0]["name"], "Newest");

    let page = app
        .request("GET", "/api/diagnostic-tests?page=2&limit=2", None, Some(&token))
        .await;
    assert_eq!(page.body["tests"].as_array().unwrap().len(), 1);
    assert_eq!(page.body["tests"][0]["name"], "Old");
    assert_eq!(page.body["pagination"]["hasNextPage"], false);

    let bogus = app
        .request("GET", "/api/diagnostic-tests?status=archived", None, Some(&token))
        .await;
    assert_eq!(bogus.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_only_touches_given_fields() {
    let app = TestApp::new();
    let token = app.user("Ada").await;

    let test = app
        .create_test(&token, json!({ "name": "CBC", "result": "Pending analysis" }))
        .await;
    let path = format!("/api/diagnostic-tests/{}", test["id"].as_str().unwrap());

    let response = app
        .request(
            "PUT",
            &path,
            Some(json!({ "result": "Normal", "notes": "Reviewed" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "CBC");
    assert_eq!(response.body["result"], "Normal");
    assert_eq!(response.body["notes"], "Reviewed");
    assert_eq!(response.body["status"], "pending");

    let empty_name = app
        .request("PUT", &path, Some(json!({ "name": "" })), Some(&token))
        .await;
    assert_eq!(empty_name.status, StatusCode::BAD_REQUEST);

    let bad_status = app
        .request("PUT", &path, Some(json!({ "status": "done" })), Some(&token))
        .await;
    assert_eq!(bad_status.status, StatusCode::BAD_REQUEST);

    let unchanged = app.request("PUT", &path, Some(json!({})), Some(&token)).await;
    assert_eq!(unchanged.status, StatusCode::OK);
    assert_eq!(unchanged.body["result"], "Normal");
}

#[tokio::test]
async fn test_status_endpoint_only_accepts_known_values() {
    let app = TestApp::new();
    let token = app.user("Ada").await;

    let test = app
        .create_test(&token, json!({ "name": "HbA1c", "result": "7.2%" }))
        .await;
    let id = test["id"].as_str().unwrap();
    let path = format!("/api/diagnostic-tests/{id}/status");

    for bad in ["archived", "Completed", ""] {
        let response = app
            .request("PATCH", &path, Some(json!({ "status": bad })), Some(&token))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "status {bad:?}");
    }

    let current = app
        .request("GET", &format!("/api/diagnostic-tests/{id}"), None, Some(&token))
        .await;
    assert_eq!(current.body["status"], "pending");

    for good in ["completed", "cancelled", "pending"] {
        let response = app
            .request("PATCH", &path, Some(json!({ "status": good })), Some(&token))
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["status"], good);
    }

    let missing = format!("/api/diagnostic-tests/{}/status", Uuid::new_v4());
    let response = app
        .request("PATCH", &missing, Some(json!({ "status": "completed" })), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete() {
    let app = TestApp::new();
    let token = app.user("Ada").await;

    let test = app
        .create_test(&token, json!({ "name": "TSH", "result": "2.1" }))
        .await;
    let path = format!("/api/diagnostic-tests/{}", test["id"].as_str().unwrap());

    let response = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Diagnostic test deleted successfully");

    let gone = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.body["message"], "Diagnostic test not found");

    let again = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_tests_are_owner_scoped() {
    let app = TestApp::new();
    let ada = app.user("Ada").await;
    let bob = app.user("Bob").await;

    let test = app
        .create_test(&ada, json!({ "name": "Private", "result": "r" }))
        .await;
    let path = format!("/api/diagnostic-tests/{}", test["id"].as_str().unwrap());

    assert_eq!(
        app.request("GET", &path, None, Some(&bob)).await.status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.request("PUT", &path, Some(json!({ "name": "Mine" })), Some(&bob))
            .await
            .status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.request("DELETE", &path, None, Some(&bob)).await.status,
        StatusCode::NOT_FOUND
    );

    let list = app
        .request("GET", "/api/diagnostic-tests", None, Some(&bob))
        .await;
    assert_eq!(list.body["pagination"]["totalItems"], 0);

    let still_there = app.request("GET", &path, None, Some(&ada)).await;
    assert_eq!(still_there.body["name"], "Private");
}

#[tokio::test]
async fn test_huge_page_number_returns_empty_page() {
    let app = TestApp::new();
    let token = app.user("Ada").await;
    app.create_test(&token, json!({ "name": "CBC", "result": "Normal" }))
        .await;

    let response = app
        .request(
            "GET",
            "/api/diagnostic-tests?page=18446744073709551615&limit=100",
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["tests"], json!([]));
    assert_eq!(response.body["pagination"]["totalItems"], 1);
    assert_eq!(response.body["pagination"]["hasNextPage"], false);
}
