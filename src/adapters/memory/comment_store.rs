use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::newest_first;
use crate::domain::comment::Comment;
use crate::domain::foundation::{CommentId, DomainError, LessonId};
use crate::ports::CommentRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryCommentRepository {
    comments: Arc<RwLock<Vec<Comment>>>,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.comments.write().await.clear();
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn insert(&self, comment: &Comment) -> Result<(), DomainError> {
        self.comments.write().await.push(comment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, DomainError> {
        Ok(self.comments.read().await.iter().find(|c| &c.id == id).cloned())
    }

    async fn delete(&self, id: &CommentId) -> Result<bool, DomainError> {
        let mut comments = self.comments.write().await;
        let before = comments.len();
        comments.retain(|c| &c.id != id);
        Ok(comments.len() < before)
    }

    async fn list_for_lesson(&self, lesson_id: &LessonId) -> Result<Vec<Comment>, DomainError> {
        let comments = self.comments.read().await;
        let matching: Vec<Comment> = comments
            .iter()
            .filter(|c| &c.lesson_id == lesson_id)
            .cloned()
            .collect();
        Ok(newest_first(&matching, |c| c.created_at))
    }
}
