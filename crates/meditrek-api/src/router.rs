//! Route definitions for the MediTrek HTTP API.
//!
//! All routes are mounted under `/api`.

use axum::Router;
use axum::routing::{get, patch, post, put};

use crate::handlers;
use crate::state::AppState;

/// Build the router with all routes, threading `AppState` through them.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(alert_routes())
        .merge(diagnostic_routes())
        .merge(chat_routes())
        .route("/health", get(handlers::health::health));

    Router::new()
        .nest("/api", api_routes)
        .fallback(handlers::health::not_found)
        .with_state(state)
}

/// Registration, login, session info
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/dashboard", get(handlers::auth::dashboard))
}

/// Profile self-service
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/user/profile",
            get(handlers::user::get_profile).put(handlers::user::update_profile),
        )
        .route("/user/password", put(handlers::user::change_password))
}

/// Alert inbox
fn alert_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/alerts",
            get(handlers::alert::list_alerts).post(handlers::alert::create_alert),
        )
        .route("/alerts/unread/count", get(handlers::alert::unread_count))
        .route("/alerts/read-all", patch(handlers::alert::mark_all_read))
        .route("/alerts/{id}", get(handlers::alert::get_alert))
        .route("/alerts/{id}/read", patch(handlers::alert::mark_read))
        .route("/alerts/{id}/dismiss", patch(handlers::alert::dismiss))
}

/// Diagnostic tests
fn diagnostic_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/diagnostic-tests",
            get(handlers::diagnostic::list_tests).post(handlers::diagnostic::create_test),
        )
        .route(
            "/diagnostic-tests/{id}",
            get(handlers::diagnostic::get_test)
                .put(handlers::diagnostic::update_test)
                .delete(handlers::diagnostic::delete_test),
        )
        .route("/diagnostic-tests/{id}/status", patch(handlers::diagnostic::update_status))
}

/// Chat relay
fn chat_routes() -> Router<AppState> {
    Router::new().route("/chat", post(handlers::chat::chat))
}
