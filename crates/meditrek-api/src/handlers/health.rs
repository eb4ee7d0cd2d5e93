//! Health check and fallback handlers.

use axum::Json;
use axum::extract::State;
use chrono::Utc;

use meditrek_core::error::AppError;

use crate::dto::response::HealthResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let connected = state.datastore.ping().await;

    Json(HealthResponse {
        status: if connected { "ok" } else { "degraded" },
        database: if connected { "connected" } else { "disconnected" },
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
    })
}

/// Any unmatched route.
pub async fn not_found() -> ApiError {
    AppError::not_found("Route not found").into()
}
