//! Profile self-service handlers.

use axum::Json;
use axum::extract::State;

use meditrek_entity::user::UserProfile;
use meditrek_service::UpdateProfileRequest;

use crate::dto::request::ChangePasswordRequest;
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidJson};
use crate::state::AppState;

/// GET /api/user/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserProfile>, ApiError> {
    let user = state.accounts.current_user(&auth).await?;
    Ok(Json(user.profile()))
}

/// PUT /api/user/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<UpdateProfileRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let profile = state.accounts.update_profile(&auth, req).await?;
    Ok(Json(profile))
}

/// PUT /api/user/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .accounts
        .change_password(&auth, &req.current_password, &req.new_password)
        .await?;
    Ok(Json(MessageResponse::new("Password updated successfully")))
}
