//! User repository port.
//!
//! The counter adjustments are reserved for the consistency engine; no
//! HTTP route reaches them directly.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Email, Timestamp};
use crate::domain::user::{Role, SignIn, UpsertOutcome, User};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create the user with defaults if absent, otherwise touch `updatedAt`.
    ///
    /// Must be idempotent, including under concurrent calls for one email.
    async fn upsert_on_login(
        &self,
        sign_in: &SignIn,
        now: Timestamp,
    ) -> Result<UpsertOutcome, DomainError>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError>;

    /// All users, newest first.
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Set `isPremium`. Returns false if no user has this email.
    async fn set_premium(
        &self,
        email: &Email,
        value: bool,
        now: Timestamp,
    ) -> Result<bool, DomainError>;

    /// Set the role. Returns false if no user has this email.
    async fn set_role(&self, email: &Email, role: Role, now: Timestamp)
        -> Result<bool, DomainError>;

    /// Atomically add `delta` to `totalLessonsCreated`, flooring at zero.
    async fn adjust_lessons_created(&self, email: &Email, delta: i64)
        -> Result<bool, DomainError>;

    /// Atomically add `delta` to `totalLessonsSaved`, flooring at zero.
    async fn adjust_lessons_saved(&self, email: &Email, delta: i64)
        -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn UserRepository) {}
    }
}
