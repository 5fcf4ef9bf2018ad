//! In-memory [`UserRepository`] for tests and store-less development.
//!
//! Behaves like the MongoDB adapter from the handlers' point of view:
//! generated ids are unique and never reused, updates and deletes of
//! unknown ids report not-found. Identifier format checks are the real
//! adapter's concern and are not replicated here.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{NewUser, User, UserId, UserPatch};

/// Mutex-guarded map of users keyed by id.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, User>>, UserRepositoryError> {
        self.users
            .lock()
            .map_err(|_| UserRepositoryError::query("user map poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<UserId, UserRepositoryError> {
        let raw = Uuid::new_v4().simple().to_string();
        let id = UserId::new(raw.clone())
            .map_err(|err| UserRepositoryError::query(format!("generated id invalid: {err}")))?;

        let mut users = self.lock()?;
        users.insert(
            raw,
            User::new(
                id.clone(),
                user.name().clone(),
                user.email().clone(),
                user.age(),
            ),
        );
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        let users = self.lock()?;
        Ok(users.values().cloned().collect())
    }

    async fn update(&self, id: &UserId, patch: &UserPatch) -> Result<(), UserRepositoryError> {
        let mut users = self.lock()?;
        let user = users
            .get_mut(id.as_ref())
            .ok_or_else(|| UserRepositoryError::not_found(id.as_ref()))?;
        user.apply(patch);
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserRepositoryError> {
        let mut users = self.lock()?;
        users
            .remove(id.as_ref())
            .map(|_| ())
            .ok_or_else(|| UserRepositoryError::not_found(id.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmailAddress, UserName};

    fn new_user(name: &str) -> NewUser {
        NewUser::new(
            UserName::new(name).expect("name"),
            EmailAddress::new("a@x.com").expect("email"),
            Some(30),
        )
    }

    #[tokio::test]
    async fn insert_assigns_fresh_unique_ids() {
        let repo = InMemoryUserRepository::new();
        let first = repo.insert(&new_user("Alex")).await.expect("insert");
        let second = repo.insert(&new_user("Robin")).await.expect("insert");
        assert_ne!(first, second);
        assert_eq!(repo.list().await.expect("list").len(), 2);
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_found_and_changes_nothing() {
        let repo = InMemoryUserRepository::new();
        repo.insert(&new_user("Alex")).await.expect("insert");

        let missing = UserId::new("missing").expect("id");
        let err = repo
            .update(&missing, &UserPatch::default())
            .await
            .expect_err("unknown id");
        assert!(matches!(err, UserRepositoryError::NotFound { .. }));

        let users = repo.list().await.expect("list");
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name().as_ref(), "Alex");
    }

    #[tokio::test]
    async fn update_applies_only_present_fields() {
        let repo = InMemoryUserRepository::new();
        let id = repo.insert(&new_user("Alex")).await.expect("insert");

        repo.update(
            &id,
            &UserPatch {
                age: Some(31),
                ..UserPatch::default()
            },
        )
        .await
        .expect("update");

        let users = repo.list().await.expect("list");
        assert_eq!(users[0].age(), Some(31));
        assert_eq!(users[0].name().as_ref(), "Alex");
        assert_eq!(users[0].email().as_ref(), "a@x.com");
    }

    #[tokio::test]
    async fn delete_removes_the_record_once() {
        let repo = InMemoryUserRepository::new();
        let id = repo.insert(&new_user("Alex")).await.expect("insert");

        repo.delete(&id).await.expect("delete");
        let err = repo.delete(&id).await.expect_err("already deleted");
        assert!(matches!(err, UserRepositoryError::NotFound { .. }));
        assert!(repo.list().await.expect("list").is_empty());
    }
}
