use std::sync::Arc;

use crate::domain::comment::Comment;
use crate::domain::foundation::{DomainError, LessonId};
use crate::ports::CommentRepository;

/// Public listing of a lesson's comments, newest first.
pub struct ListCommentsHandler {
    comments: Arc<dyn CommentRepository>,
}

impl ListCommentsHandler {
    pub fn new(comments: Arc<dyn CommentRepository>) -> Self {
        Self { comments }
    }

    pub async fn handle(&self, lesson_id: &LessonId) -> Result<Vec<Comment>, DomainError> {
        self.comments.list_for_lesson(lesson_id).await
    }
}
