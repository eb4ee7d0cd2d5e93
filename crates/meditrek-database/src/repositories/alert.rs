//! Alert repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use meditrek_core::error::{AppError, ErrorKind};
use meditrek_core::result::AppResult;
use meditrek_core::types::pagination::{PageRequest, PageResponse};
use meditrek_entity::alert::{Alert, NewAlert};

use crate::store::{AlertFilter, AlertStore};

/// Shared WHERE clause for the list and count queries. `NULL` parameters
/// disable their criterion.
const INBOX_FILTER: &str = "user_id = $1 \
     AND ($2::BOOLEAN IS NULL OR is_read = $2) \
     AND ($3::BOOLEAN IS NULL OR is_dismissed = $3) \
     AND ($4::alert_type IS NULL OR alert_type = $4) \
     AND ($5::alert_priority IS NULL OR priority = $5)";

/// Repository for alert inbox operations.
#[derive(Debug, Clone)]
pub struct AlertRepository {
    pool: PgPool,
}

impl AlertRepository {
    /// Create a new alert repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn set_flag(&self, sql: &str, id: Uuid, user_id: Uuid, what: &str) -> AppResult<Option<Alert>> {
        sqlx::query_as::<_, Alert>(sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, format!("Failed to {what}"), e))
    }
}

#[async_trait]
impl AlertStore for AlertRepository {
    async fn list(
        &self,
        user_id: Uuid,
        filter: &AlertFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Alert>> {
        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM alerts WHERE {INBOX_FILTER}"))
            .bind(user_id)
            .bind(filter.read)
            .bind(filter.dismissed)
            .bind(filter.alert_type)
            .bind(filter.priority)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count alerts", e))?;

        let alerts = sqlx::query_as::<_, Alert>(&format!(
            "SELECT * FROM alerts WHERE {INBOX_FILTER} \
             ORDER BY created_at DESC, id DESC LIMIT $6 OFFSET $7"
        ))
        .bind(user_id)
        .bind(filter.read)
        .bind(filter.dismissed)
        .bind(filter.alert_type)
        .bind(filter.priority)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list alerts", e))?;

        Ok(PageResponse::new(alerts, page, total as u64))
    }

    async fn find(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<Alert>> {
        sqlx::query_as::<_, Alert>("SELECT * FROM alerts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find alert", e))
    }

    async fn create(&self, alert: NewAlert) -> AppResult<Alert> {
        sqlx::query_as::<_, Alert>(
            "INSERT INTO alerts (id, user_id, title, message, alert_type, priority, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(alert.user_id)
        .bind(&alert.title)
        .bind(&alert.message)
        .bind(alert.alert_type)
        .bind(alert.priority)
        .bind(alert.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create alert", e))
    }

    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<Alert>> {
        self.set_flag(
            "UPDATE alerts SET is_read = TRUE, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 RETURNING *",
            id,
            user_id,
            "mark alert read",
        )
        .await
    }

    async fn dismiss(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<Alert>> {
        self.set_flag(
            "UPDATE alerts SET is_dismissed = TRUE, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 RETURNING *",
            id,
            user_id,
            "dismiss alert",
        )
        .await
    }

    async fn count_unread(&self, user_id: Uuid) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM alerts WHERE user_id = $1 AND is_read = FALSE AND is_dismissed = FALSE",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count unread", e))?;
        Ok(count as u64)
    }

    async fn count_active(&self, user_id: Uuid, now: DateTime<Utc>) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM alerts WHERE user_id = $1 AND is_dismissed = FALSE \
             AND (expires_at IS NULL OR expires_at > $2)",
        )
        .bind(user_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count active", e))?;
        Ok(count as u64)
    }

    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE alerts SET is_read = TRUE, updated_at = NOW() \
             WHERE user_id = $1 AND is_read = FALSE AND is_dismissed = FALSE",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark all read", e))?;
        Ok(result.rows_affected())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM alerts WHERE expires_at IS NOT NULL AND expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete expired alerts", e)
            })?;
        Ok(result.rows_affected())
    }
}
