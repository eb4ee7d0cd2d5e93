//! Diagnostic test handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use meditrek_entity::diagnostic::DiagnosticTest;
use meditrek_service::{CreateTestRequest, DiagnosticListQuery, UpdateTestRequest};

use crate::dto::request::UpdateStatusRequest;
use crate::dto::response::{MessageResponse, TestListResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, IdPath, JsonBody, QueryParams, ValidJson};
use crate::state::AppState;

/// GET /api/diagnostic-tests
pub async fn list_tests(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryParams(query): QueryParams<DiagnosticListQuery>,
) -> Result<Json<TestListResponse>, ApiError> {
    let page = state.diagnostics.list(&auth, &query).await?;
    Ok(Json(page.into()))
}

/// GET /api/diagnostic-tests/{id}
pub async fn get_test(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<Json<DiagnosticTest>, ApiError> {
    Ok(Json(state.diagnostics.get(&auth, id).await?))
}

/// POST /api/diagnostic-tests
pub async fn create_test(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<CreateTestRequest>,
) -> Result<(StatusCode, Json<DiagnosticTest>), ApiError> {
    let test = state.diagnostics.create(&auth, req).await?;
    Ok((StatusCode::CREATED, Json(test)))
}

/// PUT /api/diagnostic-tests/{id}
pub async fn update_test(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ValidJson(req): ValidJson<UpdateTestRequest>,
) -> Result<Json<DiagnosticTest>, ApiError> {
    Ok(Json(state.diagnostics.update(&auth, id, req).await?))
}

/// PATCH /api/diagnostic-tests/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    JsonBody(req): JsonBody<UpdateStatusRequest>,
) -> Result<Json<DiagnosticTest>, ApiError> {
    Ok(Json(
        state.diagnostics.update_status(&auth, id, &req.status).await?,
    ))
}

/// DELETE /api/diagnostic-tests/{id}
pub async fn delete_test(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<Json<MessageResponse>, ApiError> {
    state.diagnostics.delete(&auth, id).await?;
    Ok(Json(MessageResponse::new(
        "Diagnostic test deleted successfully",
    )))
}
