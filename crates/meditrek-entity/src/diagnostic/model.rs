//! Diagnostic test entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::TestStatus;

/// A single recorded test result.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticTest {
    /// Unique test identifier.
    pub id: Uuid,
    /// The owning user.
    pub user_id: Uuid,
    /// Test name, e.g. "Blood Glucose Test".
    pub name: String,
    /// Free-text result.
    pub result: String,
    /// When the test was taken.
    pub date: DateTime<Utc>,
    /// Lifecycle state.
    pub status: TestStatus,
    /// Optional clinician or patient notes.
    pub notes: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last modified.
    pub updated_at: DateTime<Utc>,
}

/// A validated test ready to be persisted.
#[derive(Debug, Clone)]
pub struct NewDiagnosticTest {
    /// Owner.
    pub user_id: Uuid,
    /// Trimmed name.
    pub name: String,
    /// Trimmed result.
    pub result: String,
    /// Test date.
    pub date: DateTime<Utc>,
    /// Optional notes.
    pub notes: Option<String>,
}

impl NewDiagnosticTest {
    /// Materialize the row this test would insert. New tests start `pending`.
    pub fn into_test(self, id: Uuid, now: DateTime<Utc>) -> DiagnosticTest {
        DiagnosticTest {
            id,
            user_id: self.user_id,
            name: self.name,
            result: self.result,
            date: self.date,
            status: TestStatus::Pending,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Whitelisted edits. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateDiagnosticTest {
    /// New name.
    pub name: Option<String>,
    /// New result.
    pub result: Option<String>,
    /// New date.
    pub date: Option<DateTime<Utc>>,
    /// New notes.
    pub notes: Option<String>,
    /// New status.
    pub status: Option<TestStatus>,
}

impl UpdateDiagnosticTest {
    /// Whether no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.result.is_none()
            && self.date.is_none()
            && self.notes.is_none()
            && self.status.is_none()
    }

    /// Apply these edits to a test in place.
    pub fn apply(&self, test: &mut DiagnosticTest, now: DateTime<Utc>) {
        if let Some(name) = &self.name {
            test.name = name.clone();
        }
        if let Some(result) = &self.result {
            test.result = result.clone();
        }
        if let Some(date) = self.date {
            test.date = date;
        }
        if let Some(notes) = &self.notes {
            test.notes = Some(notes.clone());
        }
        if let Some(status) = self.status {
            test.status = status;
        }
        test.updated_at = now;
    }
}
