//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;

use meditrek_core::types::pagination::{PageResponse, Pagination};
use meditrek_entity::alert::Alert;
use meditrek_entity::diagnostic::DiagnosticTest;

/// Plain `{ message }` body.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// An alert together with its derived `isActive` flag.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertResponse {
    #[serde(flatten)]
    pub alert: Alert,
    pub is_active: bool,
}

impl From<Alert> for AlertResponse {
    fn from(alert: Alert) -> Self {
        let is_active = alert.is_active();
        Self { alert, is_active }
    }
}

/// `GET /api/alerts`
///
/// The match count is `pagination.totalItems`, the same key the test list
/// uses. There is no alert-specific `totalAlerts` field.
#[derive(Debug, Clone, Serialize)]
pub struct AlertListResponse {
    pub alerts: Vec<AlertResponse>,
    pub pagination: Pagination,
}

impl From<PageResponse<Alert>> for AlertListResponse {
    fn from(page: PageResponse<Alert>) -> Self {
        let page = page.map(AlertResponse::from);
        Self {
            alerts: page.items,
            pagination: page.pagination,
        }
    }
}

/// `{ message, alert }` returned by create, mark-read and dismiss.
#[derive(Debug, Clone, Serialize)]
pub struct AlertActionResponse {
    pub message: String,
    pub alert: AlertResponse,
}

impl AlertActionResponse {
    pub fn new(message: impl Into<String>, alert: Alert) -> Self {
        Self {
            message: message.into(),
            alert: alert.into(),
        }
    }
}

/// `GET /api/alerts/unread/count`
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCountResponse {
    pub unread_count: u64,
}

/// `PATCH /api/alerts/read-all`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAllReadResponse {
    pub message: String,
    pub updated_count: u64,
}

/// `GET /api/diagnostic-tests`
#[derive(Debug, Clone, Serialize)]
pub struct TestListResponse {
    pub tests: Vec<DiagnosticTest>,
    pub pagination: Pagination,
}

impl From<PageResponse<DiagnosticTest>> for TestListResponse {
    fn from(page: PageResponse<DiagnosticTest>) -> Self {
        Self {
            tests: page.items,
            pagination: page.pagination,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// `ok` when the store answers, `degraded` otherwise.
    pub status: &'static str,
    /// `connected` or `disconnected`.
    pub database: &'static str,
    /// Server version.
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
}
