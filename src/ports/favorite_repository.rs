//! Favorite repository port.

use async_trait::async_trait;

use super::InsertOutcome;
use crate::domain::favorite::Favorite;
use crate::domain::foundation::{DomainError, Email, LessonId};

/// Implementations must enforce uniqueness of (userEmail, lessonId) and
/// report a violation as `InsertOutcome::Duplicate`.
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    async fn insert(&self, favorite: &Favorite) -> Result<InsertOutcome, DomainError>;

    async fn find(
        &self,
        user_email: &Email,
        lesson_id: &LessonId,
    ) -> Result<Option<Favorite>, DomainError>;

    /// Delete the pair. Returns false if nothing was deleted.
    async fn delete(&self, user_email: &Email, lesson_id: &LessonId)
        -> Result<bool, DomainError>;

    /// The user's favorites, most recently added first.
    async fn list_by_user(&self, user_email: &Email) -> Result<Vec<Favorite>, DomainError>;
}
