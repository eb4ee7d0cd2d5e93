//! Alert entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::AlertType;
use super::priority::AlertPriority;

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: u64 = 100;
/// Maximum message length in characters.
pub const MAX_MESSAGE_LEN: u64 = 500;

/// A notification surfaced to one user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Unique alert identifier.
    pub id: Uuid,
    /// The owning user.
    pub user_id: Uuid,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Visual category.
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    /// Urgency.
    pub priority: AlertPriority,
    /// Whether the user has opened this alert.
    pub is_read: bool,
    /// Whether the user dismissed this alert.
    pub is_dismissed: bool,
    /// When the store should drop this alert.
    pub expires_at: Option<DateTime<Utc>>,
    /// When the alert was created.
    pub created_at: DateTime<Utc>,
    /// When the alert was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Alert {
    /// Not dismissed and not past its expiry, as of `now`.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        if self.is_dismissed {
            return false;
        }
        !self.is_expired_at(now)
    }

    /// [`Alert::is_active_at`] evaluated against the current time.
    pub fn is_active(&self) -> bool {
        self.is_active_at(Utc::now())
    }

    /// Whether the expiry timestamp is at or before `now`. The sweeper
    /// deletes exactly these alerts.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }

    /// Whether this alert counts towards the unread badge.
    pub fn is_unread(&self) -> bool {
        !self.is_read && !self.is_dismissed
    }
}

/// A validated alert ready to be persisted.
#[derive(Debug, Clone)]
pub struct NewAlert {
    /// Owner.
    pub user_id: Uuid,
    /// Trimmed title.
    pub title: String,
    /// Trimmed message.
    pub message: String,
    /// Category.
    pub alert_type: AlertType,
    /// Urgency.
    pub priority: AlertPriority,
    /// Optional expiry.
    pub expires_at: Option<DateTime<Utc>>,
}

impl NewAlert {
    /// Materialize the row this alert would insert.
    pub fn into_alert(self, id: Uuid, now: DateTime<Utc>) -> Alert {
        Alert {
            id,
            user_id: self.user_id,
            title: self.title,
            message: self.message,
            alert_type: self.alert_type,
            priority: self.priority,
            is_read: false,
            is_dismissed: false,
            expires_at: self.expires_at,
            created_at: now,
            updated_at: now,
        }
    }
}
