//! Integration tests for registration, login, bearer auth and profile.

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use meditrek_auth::JwtEncoder;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_register_returns_session() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "name": "Sakhile Ndlazi",
                "email": "Sakhile@Example.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["type"], "Bearer");
    assert!(response.body["token"].as_str().is_some());
    assert!(response.body["expiresAt"].as_str().is_some());
    assert_eq!(response.body["user"]["email"], "sakhile@example.com");
    assert_eq!(response.body["user"]["notificationThreshold"], 5);
    assert!(response.body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new();
    app.register("Ada", "ada@example.com", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "name": "Ada", "email": "ADA@example.com", "password": "password123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["message"], "User already exists");
}

#[tokio::test]
async fn test_register_validation() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "name": "Ada", "email": "not-an-email", "password": "password123" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(response.body["details"]["email"].is_array());

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "name": "Ada", "email": "ada@example.com", "password": "abc" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["details"]["password"].is_array());
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new();

    let req = http::Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("Content-Type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let response = app.send(req).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new();
    app.register("Ada", "ada@example.com", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "ada@example.com", "password": "password123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["name"], "Ada");
    let token = response.body["token"].as_str().unwrap();

    let me = app.request("GET", "/api/auth/me", None, Some(token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["email"], "ada@example.com");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new();
    app.register("Ada", "ada@example.com", "password123").await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "ada@example.com", "password": "wrongpassword" })),
            None,
        )
        .await;
    let unknown_user = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "nobody@example.com", "password": "password123" })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body["message"], "Invalid credentials");
    assert_eq!(wrong_password.body["message"], unknown_user.body["message"]);
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = TestApp::new();

    for (method, path) in [
        ("GET", "/api/auth/me"),
        ("GET", "/api/auth/dashboard"),
        ("GET", "/api/user/profile"),
        ("GET", "/api/alerts"),
        ("GET", "/api/alerts/unread/count"),
        ("PATCH", "/api/alerts/read-all"),
        ("GET", "/api/diagnostic-tests"),
        ("POST", "/api/chat"),
    ] {
        let response = app.request(method, path, None, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{method} {path}");
        assert_eq!(response.body["error"], "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn test_rejects_bad_tokens() {
    let app = TestApp::new();

    let garbage = app
        .request("GET", "/api/auth/me", None, Some("not.a.jwt"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);

    let req = http::Request::builder()
        .method("GET")
        .uri("/api/auth/me")
        .header("Authorization", "Token abc")
        .body(axum::body::Body::empty())
        .unwrap();
    let wrong_scheme = app.send(req).await;
    assert_eq!(wrong_scheme.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_for_missing_user_is_rejected() {
    let app = TestApp::new();
    let issued = JwtEncoder::new(&app.config.auth)
        .issue(Uuid::new_v4(), "ghost@example.com")
        .unwrap();

    let response = app
        .request("GET", "/api/auth/me", None, Some(&issued.token))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "User no longer exists");
}

#[tokio::test]
async fn test_dashboard_stats_are_live() {
    let app = TestApp::new();
    let token = app.register("Ada", "ada@example.com", "password123").await;

    app.create_test(&token, json!({ "name": "Lipid Panel", "result": "Pending" }))
        .await;
    let test = app
        .create_test(&token, json!({ "name": "CBC", "result": "Normal" }))
        .await;
    let path = format!("/api/diagnostic-tests/{}/status", test["id"].as_str().unwrap());
    app.request("PATCH", &path, Some(json!({ "status": "completed" })), Some(&token))
        .await;
    app.create_alert(&token, json!({ "title": "Hello", "message": "World" }))
        .await;

    let response = app
        .request("GET", "/api/auth/dashboard", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Welcome to your dashboard, Ada!");
    let stats = &response.body["stats"];
    assert_eq!(stats["totalTests"], 2);
    assert_eq!(stats["pendingTests"], 1);
    assert_eq!(stats["completedTests"], 1);
    assert_eq!(stats["unreadAlerts"], 1);
    assert_eq!(stats["activeAlerts"], 1);
}

#[tokio::test]
async fn test_update_profile() {
    let app = TestApp::new();
    let token = app.user("Ada").await;

    let response = app
        .request(
            "PUT",
            "/api/user/profile",
            Some(json!({ "notificationThreshold": 11 })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["details"]["notificationThreshold"].is_array());

    let response = app
        .request(
            "PUT",
            "/api/user/profile",
            Some(json!({ "name": "Ada L", "notificationThreshold": 3, "emailNotifications": false })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "Ada L");
    assert_eq!(response.body["notificationThreshold"], 3);
    assert_eq!(response.body["emailNotifications"], false);

    let profile = app
        .request("GET", "/api/user/profile", None, Some(&token))
        .await;
    assert_eq!(profile.body["name"], "Ada L");
}

#[tokio::test]
async fn test_update_profile_trims_name_and_rejects_blank() {
    let app = TestApp::new();
    let token = app.user("Ada").await;

    let response = app
        .request(
            "PUT",
            "/api/user/profile",
            Some(json!({ "name": "   ", "notificationThreshold": -1 })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert_eq!(response.body["details"]["name"][0], "Name is required");
    assert_eq!(
        response.body["details"]["notificationThreshold"][0],
        "Notification threshold must be between 0 and 10"
    );

    let response = app
        .request(
            "PUT",
            "/api/user/profile",
            Some(json!({ "name": "  Ada Lovelace  " })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "Ada Lovelace");
    assert_eq!(response.body["notificationThreshold"], 5);
}

#[tokio::test]
async fn test_change_password() {
    let app = TestApp::new();
    let token = app.register("Ada", "ada@example.com", "password123").await;

    let wrong = app
        .request(
            "PUT",
            "/api/user/password",
            Some(json!({ "currentPassword": "nope", "newPassword": "newpassword1" })),
            Some(&token),
        )
        .await;
    assert_eq!(wrong.status, StatusCode::BAD_REQUEST);
    assert!(wrong.body["details"]["currentPassword"].is_array());

    let ok = app
        .request(
            "PUT",
            "/api/user/password",
            Some(json!({ "currentPassword": "password123", "newPassword": "newpassword1" })),
            Some(&token),
        )
        .await;
    assert_eq!(ok.status, StatusCode::OK);

    let old = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "ada@example.com", "password": "password123" })),
            None,
        )
        .await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);

    let new = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "ada@example.com", "password": "newpassword1" })),
            None,
        )
        .await;
    assert_eq!(new.status, StatusCode::OK);
}
