//! In-memory user store.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use meditrek_core::error::AppError;
use meditrek_core::result::AppResult;
use meditrek_entity::user::model::normalize_email;
use meditrek_entity::user::{CreateUser, UpdateProfile, User};

use crate::store::UserStore;

/// Users keyed by id, with a unique email index.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    /// User ID → user
    users: DashMap<Uuid, User>,
    /// Normalized email → user ID
    emails: DashMap<String, Uuid>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, data: CreateUser) -> AppResult<User> {
        let email = normalize_email(&data.email);
        match self.emails.entry(email.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict("User already exists")),
            Entry::Vacant(slot) => {
                let id = Uuid::new_v4();
                let user = CreateUser { email, ..data }.into_user(id, Utc::now());
                self.users.insert(id, user.clone());
                slot.insert(id);
                Ok(user)
            }
        }
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let Some(id) = self.emails.get(&normalize_email(email)).map(|r| *r.value()) else {
            return Ok(None);
        };
        self.find_by_id(id).await
    }

    async fn update_profile(&self, id: Uuid, update: &UpdateProfile) -> AppResult<Option<User>> {
        Ok(self.users.get_mut(&id).map(|mut user| {
            update.apply(&mut user, Utc::now());
            user.clone()
        }))
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<bool> {
        Ok(match self.users.get_mut(&id) {
            Some(mut user) => {
                user.password_hash = password_hash.to_string();
                user.updated_at = Utc::now();
                true
            }
            None => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meditrek_core::error::ErrorKind;

    #[tokio::test]
    async fn test_create_and_find_by_email_is_case_insensitive() {
        let store = MemoryUserStore::new();
        let user = store
            .create(CreateUser::new("Ana", "Ana@Example.com", "hash".into()))
            .await
            .unwrap();
        assert_eq!(user.email, "ana@example.com");

        let found = store.find_by_email(" ANA@example.com ").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(user.id));
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryUserStore::new();
        store
            .create(CreateUser::new("A", "a@example.com", "h".into()))
            .await
            .unwrap();
        let err = store
            .create(CreateUser::new("B", "A@EXAMPLE.COM", "h".into()))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_update_profile_and_password() {
        let store = MemoryUserStore::new();
        let user = store
            .create(CreateUser::new("A", "a@example.com", "h".into()))
            .await
            .unwrap();

        let update = UpdateProfile {
            notification_threshold: Some(8),
            ..Default::default()
        };
        let updated = store.update_profile(user.id, &update).await.unwrap().unwrap();
        assert_eq!(updated.notification_threshold, 8);
        assert_eq!(updated.name, "A");

        assert!(store.update_password(user.id, "new").await.unwrap());
        assert!(!store.update_password(Uuid::new_v4(), "new").await.unwrap());
        let reloaded = store.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(reloaded.password_hash, "new");
    }
}
