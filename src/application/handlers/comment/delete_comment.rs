//! DeleteCommentHandler - only the author may delete.

use std::sync::Arc;

use tracing::info;

use crate::domain::comment::comment_not_found;
use crate::domain::foundation::{AuthenticatedUser, CommentId, DomainError, OwnedByUser};
use crate::ports::CommentRepository;

#[derive(Debug, Clone)]
pub struct DeleteCommentCommand {
    pub principal: AuthenticatedUser,
    pub comment_id: CommentId,
}

pub struct DeleteCommentHandler {
    comments: Arc<dyn CommentRepository>,
}

impl DeleteCommentHandler {
    pub fn new(comments: Arc<dyn CommentRepository>) -> Self {
        Self { comments }
    }

    pub async fn handle(&self, cmd: DeleteCommentCommand) -> Result<(), DomainError> {
        let comment = self
            .comments
            .find_by_id(&cmd.comment_id)
            .await?
            .ok_or_else(|| comment_not_found(&cmd.comment_id))?;

        comment.check_ownership(&cmd.principal.email)?;

        if !self.comments.delete(&comment.id).await? {
            return Err(comment_not_found(&comment.id));
        }
        info!(comment_id = %comment.id, "comment deleted");
        Ok(())
    }
}
