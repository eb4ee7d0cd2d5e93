//! Shared test helpers for integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use meditrek_api::{AppState, build_app};
use meditrek_core::config::{AppConfig, StoreProvider};
use meditrek_core::error::AppError;
use meditrek_core::result::AppResult;
use meditrek_database::Datastore;
use meditrek_service::{ChatMessage, InferenceClient};

/// Inference backend that answers with a fixed reply, or fails.
#[derive(Debug, Default)]
pub struct StubInference {
    reply: Option<String>,
    /// Every conversation received, in order.
    pub calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl StubInference {
    /// Always answers `reply`.
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Always fails like an unreachable upstream.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Number of conversations received.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl InferenceClient for StubInference {
    async fn complete(&self, messages: &[ChatMessage]) -> AppResult<String> {
        self.calls.lock().unwrap().push(messages.to_vec());
        self.reply
            .clone()
            .ok_or_else(|| AppError::external_service("upstream unavailable"))
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// The stores behind the router, for direct inspection
    pub datastore: Datastore,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// App whose chat relay answers "Hello there".
    pub fn new() -> Self {
        let stub: Arc<dyn InferenceClient> = StubInference::replying("Hello\\nthere  ");
        Self::with_inference(Some(stub))
    }

    /// App over a fresh in-memory store with the given chat backend.
    pub fn with_inference(inference: Option<Arc<dyn InferenceClient>>) -> Self {
        let mut config = AppConfig::default();
        config.database.provider = StoreProvider::Memory;
        config.auth.jwt_secret = "integration-test-secret".to_string();

        let datastore = Datastore::in_memory();
        let state = AppState::new(config.clone(), datastore.clone(), inference);

        Self {
            router: build_app(state),
            datastore,
            config,
        }
    }

    /// Registers an account and returns its bearer token.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/register",
                Some(json!({ "name": name, "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["token"]
            .as_str()
            .expect("No token in register response")
            .to_string()
    }

    /// Registers a throwaway account and returns its bearer token.
    pub async fn user(&self, name: &str) -> String {
        let email = format!("{}@example.com", name.to_lowercase());
        self.register(name, &email, "password123").await
    }

    /// Creates an alert through the API and returns the response body's alert.
    pub async fn create_alert(&self, token: &str, body: Value) -> Value {
        let response = self.request("POST", "/api/alerts", Some(body), Some(token)).await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["alert"].clone()
    }

    /// Creates a diagnostic test through the API and returns it.
    pub async fn create_test(&self, token: &str, body: Value) -> Value {
        let response = self
            .request("POST", "/api/diagnostic-tests", Some(body), Some(token))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a prebuilt request
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
