//! Auth handlers: register, login, me, dashboard.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use meditrek_entity::user::UserProfile;
use meditrek_service::{AuthSession, Dashboard};

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidJson};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthSession>), ApiError> {
    let session = state
        .accounts
        .register(&req.name, &req.email, &req.password)
        .await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> Result<Json<AuthSession>, ApiError> {
    let session = state.accounts.login(&req.email, &req.password).await?;
    Ok(Json(session))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserProfile>, ApiError> {
    let user = state.accounts.current_user(&auth).await?;
    Ok(Json(user.profile()))
}

/// GET /api/auth/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Dashboard>, ApiError> {
    Ok(Json(state.accounts.dashboard(&auth).await?))
}
