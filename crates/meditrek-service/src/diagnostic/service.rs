//! Diagnostic test CRUD scoped to the authenticated user.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use meditrek_core::error::AppError;
use meditrek_core::result::AppResult;
use meditrek_core::types::pagination::{PageRequest, PageResponse};
use meditrek_database::store::{DiagnosticFilter, DiagnosticTestStore};
use meditrek_entity::diagnostic::{
    DiagnosticTest, NewDiagnosticTest, TestStatus, UpdateDiagnosticTest,
};

use crate::context::RequestContext;
use crate::validation::{not_blank, test_status, trimmed, trimmed_opt, validation_error};

/// Query string accepted by the test list.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct DiagnosticListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    #[validate(custom(function = "test_status"))]
    pub status: Option<String>,
}

/// Data for a new test. Text fields are trimmed on deserialization.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(custom(function = "not_blank", message = "Result is required"))]
    pub result: String,
    /// Defaults to now.
    pub date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "trimmed_opt")]
    pub notes: Option<String>,
}

/// Whitelisted edits. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTestRequest {
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(custom(function = "not_blank", message = "Result is required"))]
    pub result: Option<String>,
    pub date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "trimmed_opt")]
    pub notes: Option<String>,
    #[validate(custom(function = "test_status"))]
    pub status: Option<String>,
}

impl UpdateTestRequest {
    fn into_update(self) -> AppResult<UpdateDiagnosticTest> {
        self.validate().map_err(validation_error)?;

        Ok(UpdateDiagnosticTest {
            status: self.status.as_deref().map(str::parse).transpose()?,
            name: self.name,
            result: self.result,
            date: self.date,
            notes: self.notes,
        })
    }
}

/// Manages a user's diagnostic tests.
#[derive(Debug, Clone)]
pub struct DiagnosticService {
    /// Diagnostic test store.
    tests: Arc<dyn DiagnosticTestStore>,
}

impl DiagnosticService {
    /// Creates a new diagnostic service.
    pub fn new(tests: Arc<dyn DiagnosticTestStore>) -> Self {
        Self { tests }
    }

    /// Lists tests, most recent first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        query: &DiagnosticListQuery,
    ) -> AppResult<PageResponse<DiagnosticTest>> {
        query.validate().map_err(validation_error)?;
        let status = query.status.as_deref().map(str::parse).transpose()?;

        let page = PageRequest::from_query(query.page, query.limit);
        self.tests
            .list(ctx.user_id, &DiagnosticFilter { status }, &page)
            .await
    }

    /// Gets one test.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> AppResult<DiagnosticTest> {
        self.tests
            .find(id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Diagnostic test not found"))
    }

    /// Records a new pending test.
    pub async fn create(&self, ctx: &RequestContext, req: CreateTestRequest) -> AppResult<DiagnosticTest> {
        self.create_for(ctx.user_id, req).await
    }

    /// Records a new pending test for any user (seeding).
    pub async fn create_for(&self, user_id: Uuid, req: CreateTestRequest) -> AppResult<DiagnosticTest> {
        req.validate().map_err(validation_error)?;

        let test = self
            .tests
            .create(NewDiagnosticTest {
                user_id,
                name: req.name,
                result: req.result,
                date: req.date.unwrap_or_else(Utc::now),
                notes: req.notes,
            })
            .await?;

        info!(test_id = %test.id, user_id = %user_id, "Diagnostic test created");
        Ok(test)
    }

    /// Applies whitelisted edits.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        req: UpdateTestRequest,
    ) -> AppResult<DiagnosticTest> {
        let update = req.into_update()?;
        if update.is_empty() {
            return self.get(ctx, id).await;
        }
        self.tests
            .update(id, ctx.user_id, &update)
            .await?
            .ok_or_else(|| AppError::not_found("Diagnostic test not found"))
    }

    /// Sets the status. The value is checked before the store is touched.
    pub async fn update_status(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        status: &str,
    ) -> AppResult<DiagnosticTest> {
        let status: TestStatus = status.parse()?;
        let update = UpdateDiagnosticTest {
            status: Some(status),
            ..Default::default()
        };
        self.tests
            .update(id, ctx.user_id, &update)
            .await?
            .ok_or_else(|| AppError::not_found("Diagnostic test not found"))
    }

    /// Deletes a test.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        if !self.tests.delete(id, ctx.user_id).await? {
            return Err(AppError::not_found("Diagnostic test not found"));
        }
        info!(test_id = %id, user_id = %ctx.user_id, "Diagnostic test deleted");
        Ok(())
    }
}
