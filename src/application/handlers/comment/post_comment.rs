//! PostCommentHandler - author identity always comes from the token.

use std::sync::Arc;

use tracing::debug;

use crate::domain::comment::Comment;
use crate::domain::foundation::{AuthenticatedUser, DomainError, LessonId, Timestamp};
use crate::ports::CommentRepository;

#[derive(Debug, Clone)]
pub struct PostCommentCommand {
    pub principal: AuthenticatedUser,
    pub lesson_id: LessonId,
    pub text: String,
    /// Display name override; defaults to the token's name.
    pub user_name: Option<String>,
    pub user_photo: Option<String>,
}

pub struct PostCommentHandler {
    comments: Arc<dyn CommentRepository>,
}

impl PostCommentHandler {
    pub fn new(comments: Arc<dyn CommentRepository>) -> Self {
        Self { comments }
    }

    pub async fn handle(&self, cmd: PostCommentCommand) -> Result<Comment, DomainError> {
        let comment = Comment::post(
            cmd.lesson_id,
            cmd.principal.email.clone(),
            cmd.user_name.or_else(|| cmd.principal.display_name.clone()),
            cmd.user_photo.or_else(|| cmd.principal.picture.clone()),
            cmd.text,
            Timestamp::now(),
        )?;

        self.comments.insert(&comment).await?;
        debug!(comment_id = %comment.id, lesson_id = %comment.lesson_id, "comment posted");
        Ok(comment)
    }
}
