//! Diagnostic test repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use meditrek_core::error::{AppError, ErrorKind};
use meditrek_core::result::AppResult;
use meditrek_core::types::pagination::{PageRequest, PageResponse};
use meditrek_entity::diagnostic::{
    DiagnosticTest, NewDiagnosticTest, TestStatus, UpdateDiagnosticTest,
};

use crate::store::{DiagnosticFilter, DiagnosticTestStore, StatusCounts};

/// Repository for diagnostic test CRUD.
#[derive(Debug, Clone)]
pub struct DiagnosticTestRepository {
    pool: PgPool,
}

impl DiagnosticTestRepository {
    /// Create a new diagnostic test repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DiagnosticTestStore for DiagnosticTestRepository {
    async fn list(
        &self,
        user_id: Uuid,
        filter: &DiagnosticFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<DiagnosticTest>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM diagnostic_tests \
             WHERE user_id = $1 AND ($2::test_status IS NULL OR status = $2)",
        )
        .bind(user_id)
        .bind(filter.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count tests", e))?;

        let tests = sqlx::query_as::<_, DiagnosticTest>(
            "SELECT * FROM diagnostic_tests \
             WHERE user_id = $1 AND ($2::test_status IS NULL OR status = $2) \
             ORDER BY date DESC, id DESC LIMIT $3 OFFSET $4",
        )
        .bind(user_id)
        .bind(filter.status)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tests", e))?;

        Ok(PageResponse::new(tests, page, total as u64))
    }

    async fn find(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<DiagnosticTest>> {
        sqlx::query_as::<_, DiagnosticTest>(
            "SELECT * FROM diagnostic_tests WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find test", e))
    }

    async fn create(&self, test: NewDiagnosticTest) -> AppResult<DiagnosticTest> {
        sqlx::query_as::<_, DiagnosticTest>(
            "INSERT INTO diagnostic_tests (id, user_id, name, result, date, notes) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(test.user_id)
        .bind(&test.name)
        .bind(&test.result)
        .bind(test.date)
        .bind(&test.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create test", e))
    }

    async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        update: &UpdateDiagnosticTest,
    ) -> AppResult<Option<DiagnosticTest>> {
        sqlx::query_as::<_, DiagnosticTest>(
            "UPDATE diagnostic_tests SET name = COALESCE($3, name), \
                                         result = COALESCE($4, result), \
                                         date = COALESCE($5, date), \
                                         notes = COALESCE($6, notes), \
                                         status = COALESCE($7, status), \
                                         updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .bind(&update.name)
        .bind(&update.result)
        .bind(update.date)
        .bind(&update.notes)
        .bind(update.status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update test", e))
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM diagnostic_tests WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete test", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_by_status(&self, user_id: Uuid) -> AppResult<StatusCounts> {
        let rows: Vec<(TestStatus, i64)> = sqlx::query_as(
            "SELECT status, COUNT(*) FROM diagnostic_tests WHERE user_id = $1 GROUP BY status",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count tests", e))?;

        let mut counts = StatusCounts::default();
        for (status, count) in rows {
            match status {
                TestStatus::Pending => counts.pending = count as u64,
                TestStatus::Completed => counts.completed = count as u64,
                TestStatus::Cancelled => counts.cancelled = count as u64,
            }
        }
        Ok(counts)
    }
}
