//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Default number of days before a test result triggers a reminder.
pub const DEFAULT_NOTIFICATION_THRESHOLD: i32 = 5;

/// A registered patient account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Login email, stored lower-cased and unique.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Alert threshold chosen on the profile page.
    pub notification_threshold: i32,
    /// Whether the user wants alerts mirrored by email.
    pub email_notifications: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Public view of this user, without credentials.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            notification_threshold: self.notification_threshold,
            email_notifications: self.email_notifications,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// The user fields safe to return to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email.
    pub email: String,
    /// Alert threshold.
    pub notification_threshold: i32,
    /// Email notification preference.
    pub email_notifications: bool,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Display name.
    pub name: String,
    /// Email address; normalized by [`normalize_email`].
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Alert threshold (defaults applied by the caller).
    pub notification_threshold: i32,
    /// Email notification preference.
    pub email_notifications: bool,
}

impl CreateUser {
    /// Build a new-user record with default preferences.
    pub fn new(name: &str, email: &str, password_hash: String) -> Self {
        Self {
            name: name.trim().to_string(),
            email: normalize_email(email),
            password_hash,
            notification_threshold: DEFAULT_NOTIFICATION_THRESHOLD,
            email_notifications: true,
        }
    }

    /// Materialize the row this request would insert.
    pub fn into_user(self, id: Uuid, now: DateTime<Utc>) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            notification_threshold: self.notification_threshold,
            email_notifications: self.email_notifications,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Profile edits. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    /// New display name.
    pub name: Option<String>,
    /// New alert threshold.
    pub notification_threshold: Option<i32>,
    /// New email notification preference.
    pub email_notifications: Option<bool>,
}

impl UpdateProfile {
    /// Apply these edits to a user in place.
    pub fn apply(&self, user: &mut User, now: DateTime<Utc>) {
        if let Some(name) = &self.name {
            user.name = name.trim().to_string();
        }
        if let Some(threshold) = self.notification_threshold {
            user.notification_threshold = threshold;
        }
        if let Some(flag) = self.email_notifications {
            user.email_notifications = flag;
        }
        user.updated_at = now;
    }
}

/// Canonical form used for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
