use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, Email, Timestamp};
use crate::domain::user::{Role, SignIn, UpsertOutcome, User};
use crate::ports::UserRepository;

/// Users keyed by email, which makes the email uniqueness structural.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Email, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.users.write().await.clear();
    }

    /// Overwrite a stored user as-is (test setup, e.g. seeding an admin).
    pub async fn put(&self, user: User) {
        self.users.write().await.insert(user.email.clone(), user);
    }

    async fn update<F>(&self, email: &Email, apply: F) -> Result<bool, DomainError>
    where
        F: FnOnce(&mut User) + Send,
    {
        let mut users = self.users.write().await;
        match users.get_mut(email) {
            Some(user) => {
                apply(user);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn upsert_on_login(
        &self,
        sign_in: &SignIn,
        now: Timestamp,
    ) -> Result<UpsertOutcome, DomainError> {
        let mut users = self.users.write().await;
        if let Some(existing) = users.get_mut(&sign_in.email) {
            existing.updated_at = now;
            return Ok(UpsertOutcome {
                user: existing.clone(),
                created: false,
            });
        }
        let user = User::register(sign_in.clone(), now);
        users.insert(user.email.clone(), user.clone());
        Ok(UpsertOutcome {
            user,
            created: true,
        })
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let mut out: Vec<User> = self.users.read().await.values().cloned().collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    async fn set_premium(
        &self,
        email: &Email,
        value: bool,
        now: Timestamp,
    ) -> Result<bool, DomainError> {
        self.update(email, |user| {
            user.is_premium = value;
            user.updated_at = now;
        })
        .await
    }

    async fn set_role(
        &self,
        email: &Email,
        role: Role,
        now: Timestamp,
    ) -> Result<bool, DomainError> {
        self.update(email, |user| {
            user.role = role;
            user.updated_at = now;
        })
        .await
    }

    async fn adjust_lessons_created(
        &self,
        email: &Email,
        delta: i64,
    ) -> Result<bool, DomainError> {
        self.update(email, |user| user.adjust_lessons_created(delta)).await
    }

    async fn adjust_lessons_saved(&self, email: &Email, delta: i64) -> Result<bool, DomainError> {
        self.update(email, |user| user.adjust_lessons_saved(delta)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign_in(email: &str) -> SignIn {
        SignIn {
            email: Email::new(email).unwrap(),
            name: None,
            photo_url: None,
        }
    }

    #[tokio::test]
    async fn upsert_creates_once_then_touches() {
        let repo = InMemoryUserRepository::new();
        let first_at = Timestamp::now();
        let first = repo.upsert_on_login(&sign_in("a@x.com"), first_at).await.unwrap();
        assert!(first.created);

        repo.adjust_lessons_created(&first.user.email, 2).await.unwrap();

        let later = first_at.plus_millis(1000);
        let second = repo.upsert_on_login(&sign_in("a@x.com"), later).await.unwrap();
        assert!(!second.created);
        assert_eq!(second.user.id, first.user.id);
        assert_eq!(second.user.total_lessons_created, 2);
        assert_eq!(second.user.created_at, first_at);
        assert_eq!(second.user.updated_at, later);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn set_premium_on_missing_user_reports_false() {
        let repo = InMemoryUserRepository::new();
        let email = Email::new("ghost@x.com").unwrap();
        assert!(!repo.set_premium(&email, true, Timestamp::now()).await.unwrap());
    }

    #[tokio::test]
    async fn saved_counter_floors_at_zero() {
        let repo = InMemoryUserRepository::new();
        let outcome = repo.upsert_on_login(&sign_in("b@y.com"), Timestamp::now()).await.unwrap();
        repo.adjust_lessons_saved(&outcome.user.email, -1).await.unwrap();
        let user = repo.find_by_email(&outcome.user.email).await.unwrap().unwrap();
        assert_eq!(user.total_lessons_saved, 0);
    }
}
