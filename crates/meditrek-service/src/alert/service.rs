//! Alert inbox operations scoped to the authenticated user.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use meditrek_core::error::AppError;
use meditrek_core::result::AppResult;
use meditrek_core::types::pagination::{PageRequest, PageResponse};
use meditrek_database::store::{AlertFilter, AlertStore};
use meditrek_entity::alert::model::{MAX_MESSAGE_LEN, MAX_TITLE_LEN};
use meditrek_entity::alert::{Alert, NewAlert};

use crate::context::RequestContext;
use crate::validation::{alert_priority, alert_type, not_blank, trimmed, validation_error};

/// Query string accepted by the alert list.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AlertListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub read: Option<bool>,
    pub dismissed: Option<bool>,
    #[validate(custom(function = "alert_type"))]
    pub r#type: Option<String>,
    #[validate(custom(function = "alert_priority"))]
    pub priority: Option<String>,
}

impl AlertListQuery {
    /// Validated store filter and page.
    pub fn resolve(&self) -> AppResult<(AlertFilter, PageRequest)> {
        self.validate().map_err(validation_error)?;

        let filter = AlertFilter {
            read: self.read,
            dismissed: self.dismissed,
            alert_type: self.r#type.as_deref().map(str::parse).transpose()?,
            priority: self.priority.as_deref().map(str::parse).transpose()?,
        };
        Ok((filter, PageRequest::from_query(self.page, self.limit)))
    }
}

/// Data for a new alert, as received from a client or the CLI.
///
/// Text fields are trimmed on deserialization. Callers building the struct
/// by hand pass trimmed values.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlertRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        custom(function = "not_blank", message = "Title is required"),
        length(max = MAX_TITLE_LEN, message = "Title cannot exceed 100 characters")
    )]
    pub title: String,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        custom(function = "not_blank", message = "Message is required"),
        length(max = MAX_MESSAGE_LEN, message = "Message cannot exceed 500 characters")
    )]
    pub message: String,
    /// Defaults to `info`.
    #[validate(custom(function = "alert_type"))]
    pub r#type: Option<String>,
    /// Defaults to `medium`.
    #[validate(custom(function = "alert_priority"))]
    pub priority: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl CreateAlertRequest {
    /// Validate every field and build the record for `user_id`.
    pub fn into_new_alert(self, user_id: Uuid) -> AppResult<NewAlert> {
        self.validate().map_err(validation_error)?;

        Ok(NewAlert {
            user_id,
            alert_type: self.r#type.as_deref().map(str::parse).transpose()?.unwrap_or_default(),
            priority: self.priority.as_deref().map(str::parse).transpose()?.unwrap_or_default(),
            title: self.title,
            message: self.message,
            expires_at: self.expires_at,
        })
    }
}

/// Manages a user's alert inbox.
#[derive(Debug, Clone)]
pub struct AlertService {
    /// Alert store.
    alerts: Arc<dyn AlertStore>,
}

impl AlertService {
    /// Creates a new alert service.
    pub fn new(alerts: Arc<dyn AlertStore>) -> Self {
        Self { alerts }
    }

    /// Lists the current user's alerts, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        query: &AlertListQuery,
    ) -> AppResult<PageResponse<Alert>> {
        let (filter, page) = query.resolve()?;
        self.alerts.list(ctx.user_id, &filter, &page).await
    }

    /// Gets one alert.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Alert> {
        self.alerts
            .find(id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Alert not found"))
    }

    /// Creates an alert in the current user's inbox.
    pub async fn create(&self, ctx: &RequestContext, req: CreateAlertRequest) -> AppResult<Alert> {
        self.create_for(ctx.user_id, req).await
    }

    /// Creates an alert in any user's inbox (admin tooling).
    pub async fn create_for(&self, user_id: Uuid, req: CreateAlertRequest) -> AppResult<Alert> {
        let alert = self.alerts.create(req.into_new_alert(user_id)?).await?;
        info!(
            alert_id = %alert.id,
            user_id = %user_id,
            priority = %alert.priority,
            "Alert created"
        );
        Ok(alert)
    }

    /// Marks an alert read.
    pub async fn mark_read(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Alert> {
        self.alerts
            .mark_read(id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Alert not found"))
    }

    /// Dismisses an alert.
    pub async fn dismiss(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Alert> {
        self.alerts
            .dismiss(id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Alert not found"))
    }

    /// Counts unread, non-dismissed alerts.
    pub async fn unread_count(&self, ctx: &RequestContext) -> AppResult<u64> {
        self.alerts.count_unread(ctx.user_id).await
    }

    /// Marks every unread alert read and returns how many changed.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> AppResult<u64> {
        let updated = self.alerts.mark_all_read(ctx.user_id).await?;
        info!(user_id = %ctx.user_id, updated, "Marked all alerts read");
        Ok(updated)
    }
}
