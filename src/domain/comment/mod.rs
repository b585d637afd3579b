//! Comments on lessons. Only the author may delete a comment.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CommentId, DomainError, Email, ErrorCode, LessonId, OwnedByUser, Timestamp, ValidationError,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub lesson_id: LessonId,
    pub user_email: Email,
    pub user_name: Option<String>,
    pub user_photo: Option<String>,
    pub comment: String,
    pub created_at: Timestamp,
}

impl Comment {
    pub fn post(
        lesson_id: LessonId,
        user_email: Email,
        user_name: Option<String>,
        user_photo: Option<String>,
        text: impl Into<String>,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::empty_field("comment"));
        }
        Ok(Self {
            id: CommentId::new(),
            lesson_id,
            user_email,
            user_name,
            user_photo,
            comment: text,
            created_at: now,
        })
    }
}

impl OwnedByUser for Comment {
    fn owner_email(&self) -> &Email {
        &self.user_email
    }
}

pub fn comment_not_found(id: &CommentId) -> DomainError {
    DomainError::new(ErrorCode::CommentNotFound, format!("Comment not found: {}", id))
        .with_detail("commentId", id.to_string())
}
