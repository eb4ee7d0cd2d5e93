//! In-memory diagnostic test store.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use meditrek_core::result::AppResult;
use meditrek_core::types::pagination::{PageRequest, PageResponse};
use meditrek_entity::diagnostic::{DiagnosticTest, NewDiagnosticTest, UpdateDiagnosticTest};

use super::{Sequence, paginate};
use crate::store::{DiagnosticFilter, DiagnosticTestStore, StatusCounts};

/// Diagnostic tests keyed by id, tagged with their insertion sequence.
#[derive(Debug, Default)]
pub struct MemoryDiagnosticTestStore {
    tests: DashMap<Uuid, (u64, DiagnosticTest)>,
    seq: Sequence,
}

impl MemoryDiagnosticTestStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DiagnosticTestStore for MemoryDiagnosticTestStore {
    async fn list(
        &self,
        user_id: Uuid,
        filter: &DiagnosticFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<DiagnosticTest>> {
        let mut matching: Vec<(u64, DiagnosticTest)> = self
            .tests
            .iter()
            .filter(|r| r.value().1.user_id == user_id && filter.matches(&r.value().1))
            .map(|r| r.value().clone())
            .collect();
        matching.sort_by(|(sa, a), (sb, b)| b.date.cmp(&a.date).then(sb.cmp(sa)));

        let total = matching.len() as u64;
        let items = paginate(matching, page.offset(), page.limit())
            .into_iter()
            .map(|(_, t)| t)
            .collect();
        Ok(PageResponse::new(items, page, total))
    }

    async fn find(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<DiagnosticTest>> {
        Ok(self
            .tests
            .get(&id)
            .map(|r| r.value().1.clone())
            .filter(|t| t.user_id == user_id))
    }

    async fn create(&self, test: NewDiagnosticTest) -> AppResult<DiagnosticTest> {
        let test = test.into_test(Uuid::new_v4(), Utc::now());
        self.tests.insert(test.id, (self.seq.next(), test.clone()));
        Ok(test)
    }

    async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        update: &UpdateDiagnosticTest,
    ) -> AppResult<Option<DiagnosticTest>> {
        let Some(mut entry) = self.tests.get_mut(&id) else {
            return Ok(None);
        };
        let (_, test) = entry.value_mut();
        if test.user_id != user_id {
            return Ok(None);
        }
        update.apply(test, Utc::now());
        Ok(Some(test.clone()))
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        Ok(self
            .tests
            .remove_if(&id, |_, (_, t)| t.user_id == user_id)
            .is_some())
    }

    async fn count_by_status(&self, user_id: Uuid) -> AppResult<StatusCounts> {
        let mut counts = StatusCounts::default();
        for entry in self.tests.iter() {
            let (_, test) = entry.value();
            if test.user_id == user_id {
                counts.record(test.status);
            }
        }
        Ok(counts)
    }
}
