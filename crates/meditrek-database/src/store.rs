//! Store traits implemented by the PostgreSQL repositories and the
//! in-memory stores.
//!
//! Every alert and diagnostic-test operation takes the owning user's id and
//! only ever sees that user's records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use meditrek_core::result::AppResult;
use meditrek_core::types::pagination::{PageRequest, PageResponse};
use meditrek_entity::alert::{Alert, AlertPriority, AlertType, NewAlert};
use meditrek_entity::diagnostic::{
    DiagnosticTest, NewDiagnosticTest, TestStatus, UpdateDiagnosticTest,
};
use meditrek_entity::user::{CreateUser, UpdateProfile, User};

/// Optional alert list filters. `None` means "any".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertFilter {
    /// Match on `is_read`.
    pub read: Option<bool>,
    /// Match on `is_dismissed`.
    pub dismissed: Option<bool>,
    /// Match on type.
    pub alert_type: Option<AlertType>,
    /// Match on priority.
    pub priority: Option<AlertPriority>,
}

impl AlertFilter {
    /// Whether an alert passes every set criterion.
    pub fn matches(&self, alert: &Alert) -> bool {
        self.read.is_none_or(|r| alert.is_read == r)
            && self.dismissed.is_none_or(|d| alert.is_dismissed == d)
            && self.alert_type.is_none_or(|t| alert.alert_type == t)
            && self.priority.is_none_or(|p| alert.priority == p)
    }
}

/// Optional diagnostic test list filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagnosticFilter {
    /// Match on status.
    pub status: Option<TestStatus>,
}

impl DiagnosticFilter {
    /// Whether a test passes the filter.
    pub fn matches(&self, test: &DiagnosticTest) -> bool {
        self.status.is_none_or(|s| test.status == s)
    }
}

/// Per-status totals for one user's diagnostic tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    /// Tests awaiting a result.
    pub pending: u64,
    /// Tests with a recorded result.
    pub completed: u64,
    /// Cancelled tests.
    pub cancelled: u64,
}

impl StatusCounts {
    /// Sum over all statuses.
    pub fn total(&self) -> u64 {
        self.pending + self.completed + self.cancelled
    }

    /// Count one more test with the given status.
    pub fn record(&mut self, status: TestStatus) {
        match status {
            TestStatus::Pending => self.pending += 1,
            TestStatus::Completed => self.completed += 1,
            TestStatus::Cancelled => self.cancelled += 1,
        }
    }
}

/// Persistence for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a user. Fails with a conflict error if the email is taken.
    async fn create(&self, user: CreateUser) -> AppResult<User>;

    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by (normalized) email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Apply profile edits, returning the updated user if it exists.
    async fn update_profile(&self, id: Uuid, update: &UpdateProfile) -> AppResult<Option<User>>;

    /// Replace the stored password hash. Returns `false` if the user is gone.
    async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<bool>;
}

/// Persistence for the alert inbox.
#[async_trait]
pub trait AlertStore: Send + Sync + std::fmt::Debug + 'static {
    /// List one user's alerts, newest first.
    async fn list(
        &self,
        user_id: Uuid,
        filter: &AlertFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Alert>>;

    /// Find one alert owned by `user_id`.
    async fn find(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<Alert>>;

    /// Persist a validated alert.
    async fn create(&self, alert: NewAlert) -> AppResult<Alert>;

    /// Set `is_read`. Returns the updated alert, or `None` if not owned/absent.
    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<Alert>>;

    /// Set `is_dismissed`. Returns the updated alert, or `None` if not owned/absent.
    async fn dismiss(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<Alert>>;

    /// Count alerts that are neither read nor dismissed.
    async fn count_unread(&self, user_id: Uuid) -> AppResult<u64>;

    /// Count alerts that are not dismissed and not expired as of `now`.
    async fn count_active(&self, user_id: Uuid, now: DateTime<Utc>) -> AppResult<u64>;

    /// Mark every unread, non-dismissed alert read. Returns the affected count.
    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64>;

    /// Delete every alert whose expiry is at or before `now`, for all users.
    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64>;
}

/// Persistence for diagnostic tests.
#[async_trait]
pub trait DiagnosticTestStore: Send + Sync + std::fmt::Debug + 'static {
    /// List one user's tests, most recent test date first.
    async fn list(
        &self,
        user_id: Uuid,
        filter: &DiagnosticFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<DiagnosticTest>>;

    /// Find one test owned by `user_id`.
    async fn find(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<DiagnosticTest>>;

    /// Persist a validated test.
    async fn create(&self, test: NewDiagnosticTest) -> AppResult<DiagnosticTest>;

    /// Apply whitelisted edits. Returns `None` if not owned/absent.
    async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        update: &UpdateDiagnosticTest,
    ) -> AppResult<Option<DiagnosticTest>>;

    /// Delete a test. Returns `false` if not owned/absent.
    async fn delete(&self, id: Uuid, user_id: Uuid) -> AppResult<bool>;

    /// Per-status totals for one user.
    async fn count_by_status(&self, user_id: Uuid) -> AppResult<StatusCounts>;
}
