//! Request DTOs that are specific to the HTTP layer.
//!
//! Bodies shared with the CLI (alerts, diagnostic tests, profile edits) are
//! deserialized straight into the service request types.

use serde::Deserialize;
use validator::Validate;

use meditrek_service::ChatTurn;

/// Register request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name.
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Email address.
    #[serde(default)]
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,
    /// Password. The length policy is applied by the account service.
    #[serde(default)]
    pub password: String,
}

/// Login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[serde(default)]
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,
    /// Password.
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Change password request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// Current password.
    #[serde(default)]
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    /// New password.
    #[serde(default)]
    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}

/// Diagnostic test status change.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: String,
}

/// Chat request: the conversation so far plus the newest user message.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatTurn>,
    #[serde(default)]
    pub message: String,
}
