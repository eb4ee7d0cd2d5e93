//! Chat relay handler.

use axum::Json;
use axum::extract::State;
use tracing::debug;

use meditrek_service::ChatReply;

use crate::dto::request::ChatRequest;
use crate::error::ApiError;
use crate::extractors::{AuthUser, JsonBody};
use crate::state::AppState;

/// POST /api/chat
pub async fn chat(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(req): JsonBody<ChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    debug!(user_id = %auth.user_id, history = req.messages.len(), "Chat message");
    let reply = state.chat.reply(req.messages, &req.message).await?;
    Ok(Json(reply))
}
