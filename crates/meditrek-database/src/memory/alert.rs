//! In-memory alert store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use meditrek_core::result::AppResult;
use meditrek_core::types::pagination::{PageRequest, PageResponse};
use meditrek_entity::alert::{Alert, NewAlert};

use super::{Sequence, paginate};
use crate::store::{AlertFilter, AlertStore};

/// Alerts keyed by id. Each entry carries its insertion sequence number.
#[derive(Debug, Default)]
pub struct MemoryAlertStore {
    alerts: DashMap<Uuid, (u64, Alert)>,
    seq: Sequence,
}

impl MemoryAlertStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn update_owned(
        &self,
        id: Uuid,
        user_id: Uuid,
        f: impl FnOnce(&mut Alert),
    ) -> Option<Alert> {
        let mut entry = self.alerts.get_mut(&id)?;
        let (_, alert) = entry.value_mut();
        if alert.user_id != user_id {
            return None;
        }
        f(alert);
        alert.updated_at = Utc::now();
        Some(alert.clone())
    }
}

#[async_trait]
impl AlertStore for MemoryAlertStore {
    async fn list(
        &self,
        user_id: Uuid,
        filter: &AlertFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Alert>> {
        let mut matching: Vec<(u64, Alert)> = self
            .alerts
            .iter()
            .filter(|r| r.value().1.user_id == user_id && filter.matches(&r.value().1))
            .map(|r| r.value().clone())
            .collect();
        matching.sort_by(|(sa, a), (sb, b)| b.created_at.cmp(&a.created_at).then(sb.cmp(sa)));

        let total = matching.len() as u64;
        let items = paginate(matching, page.offset(), page.limit())
            .into_iter()
            .map(|(_, a)| a)
            .collect();
        Ok(PageResponse::new(items, page, total))
    }

    async fn find(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<Alert>> {
        Ok(self
            .alerts
            .get(&id)
            .map(|r| r.value().1.clone())
            .filter(|a| a.user_id == user_id))
    }

    async fn create(&self, alert: NewAlert) -> AppResult<Alert> {
        let alert = alert.into_alert(Uuid::new_v4(), Utc::now());
        self.alerts.insert(alert.id, (self.seq.next(), alert.clone()));
        Ok(alert)
    }

    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<Alert>> {
        Ok(self.update_owned(id, user_id, |a| a.is_read = true))
    }

    async fn dismiss(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<Alert>> {
        Ok(self.update_owned(id, user_id, |a| a.is_dismissed = true))
    }

    async fn count_unread(&self, user_id: Uuid) -> AppResult<u64> {
        Ok(self
            .alerts
            .iter()
            .filter(|r| r.value().1.user_id == user_id && r.value().1.is_unread())
            .count() as u64)
    }

    async fn count_active(&self, user_id: Uuid, now: DateTime<Utc>) -> AppResult<u64> {
        Ok(self
            .alerts
            .iter()
            .filter(|r| r.value().1.user_id == user_id && r.value().1.is_active_at(now))
            .count() as u64)
    }

    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64> {
        let now = Utc::now();
        let mut changed = 0;
        for mut entry in self.alerts.iter_mut() {
            let (_, alert) = entry.value_mut();
            if alert.user_id == user_id && alert.is_unread() {
                alert.is_read = true;
                alert.updated_at = now;
                changed += 1;
            }
        }
        Ok(changed)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut removed = 0;
        self.alerts.retain(|_, (_, alert)| {
            let keep = !alert.is_expired_at(now);
            if !keep {
                removed += 1;
            }
            keep
        });
        Ok(removed)
    }
}
