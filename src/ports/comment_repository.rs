//! Comment repository port.

use async_trait::async_trait;

use crate::domain::comment::Comment;
use crate::domain::foundation::{CommentId, DomainError, LessonId};

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn insert(&self, comment: &Comment) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, DomainError>;

    /// Returns false if nothing was deleted.
    async fn delete(&self, id: &CommentId) -> Result<bool, DomainError>;

    /// Comments on a lesson, newest first.
    async fn list_for_lesson(&self, lesson_id: &LessonId) -> Result<Vec<Comment>, DomainError>;
}
