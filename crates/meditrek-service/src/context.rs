//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use meditrek_entity::user::User;

/// Context for the current authenticated request.
///
/// Built by the auth extractor and passed into service methods so that
/// every operation knows *who* is acting. All owner scoping uses `user_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// Display name at the time of the request.
    pub name: String,
    /// Email at the time of the request.
    pub email: String,
    /// ID of the bearer token that authenticated the request.
    pub token_id: Uuid,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context for a loaded user.
    pub fn new(user: &User, token_id: Uuid) -> Self {
        Self {
            user_id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            token_id,
            request_time: Utc::now(),
        }
    }
}
