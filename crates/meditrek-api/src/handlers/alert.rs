//! Alert inbox handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use meditrek_service::{AlertListQuery, CreateAlertRequest};

use crate::dto::response::{
    AlertActionResponse, AlertListResponse, AlertResponse, MarkAllReadResponse,
    UnreadCountResponse,
};
use crate::error::ApiError;
use crate::extractors::{AuthUser, IdPath, QueryParams, ValidJson};
use crate::state::AppState;

/// GET /api/alerts
pub async fn list_alerts(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryParams(query): QueryParams<AlertListQuery>,
) -> Result<Json<AlertListResponse>, ApiError> {
    let page = state.alerts.list(&auth, &query).await?;
    Ok(Json(page.into()))
}

/// GET /api/alerts/{id}
pub async fn get_alert(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<Json<AlertResponse>, ApiError> {
    let alert = state.alerts.get(&auth, id).await?;
    Ok(Json(alert.into()))
}

/// POST /api/alerts
pub async fn create_alert(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<CreateAlertRequest>,
) -> Result<(StatusCode, Json<AlertActionResponse>), ApiError> {
    let alert = state.alerts.create(&auth, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(AlertActionResponse::new("Alert created successfully", alert)),
    ))
}

/// PATCH /api/alerts/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<Json<AlertActionResponse>, ApiError> {
    let alert = state.alerts.mark_read(&auth, id).await?;
    Ok(Json(AlertActionResponse::new("Alert marked as read", alert)))
}

/// PATCH /api/alerts/{id}/dismiss
pub async fn dismiss(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<Json<AlertActionResponse>, ApiError> {
    let alert = state.alerts.dismiss(&auth, id).await?;
    Ok(Json(AlertActionResponse::new("Alert dismissed", alert)))
}

/// GET /api/alerts/unread/count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UnreadCountResponse>, ApiError> {
    let unread_count = state.alerts.unread_count(&auth).await?;
    Ok(Json(UnreadCountResponse { unread_count }))
}

/// PATCH /api/alerts/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MarkAllReadResponse>, ApiError> {
    let updated_count = state.alerts.mark_all_read(&auth).await?;
    Ok(Json(MarkAllReadResponse {
        message: "All alerts marked as read".to_string(),
        updated_count,
    }))
}
