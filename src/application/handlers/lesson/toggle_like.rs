//! ToggleLikeHandler - like or unlike a lesson as the principal.

use std::sync::Arc;

use tracing::debug;

use crate::domain::foundation::{AuthenticatedUser, DomainError, Email, LessonId};
use crate::domain::lesson::{lesson_not_found, LikeToggle};
use crate::ports::LessonRepository;

#[derive(Debug, Clone)]
pub struct ToggleLikeCommand {
    pub principal: AuthenticatedUser,
    pub lesson_id: LessonId,
    /// Email the client claims to act as. Must match the principal when
    /// present; older clients still send it.
    pub claimed_email: Option<Email>,
}

pub struct ToggleLikeHandler {
    lessons: Arc<dyn LessonRepository>,
}

impl ToggleLikeHandler {
    pub fn new(lessons: Arc<dyn LessonRepository>) -> Self {
        Self { lessons }
    }

    pub async fn handle(&self, cmd: ToggleLikeCommand) -> Result<LikeToggle, DomainError> {
        if let Some(claimed) = &cmd.claimed_email {
            if claimed != &cmd.principal.email {
                return Err(DomainError::forbidden("Cannot like on behalf of another user")
                    .with_detail("claimed", claimed.to_string())
                    .with_detail("requested_by", cmd.principal.email.to_string()));
            }
        }

        let toggle = self
            .lessons
            .toggle_like(&cmd.lesson_id, &cmd.principal.email)
            .await?
            .ok_or_else(|| lesson_not_found(&cmd.lesson_id))?;

        debug!(
            lesson_id = %cmd.lesson_id,
            user = %cmd.principal.email,
            liked = toggle.liked,
            likes_count = toggle.likes_count,
            "like toggled"
        );
        Ok(toggle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{email, principal, Stores};
    use crate::domain::foundation::ErrorCode;

    fn cmd(who: &str, lesson_id: LessonId) -> ToggleLikeCommand {
        ToggleLikeCommand {
            principal: principal(who),
            lesson_id,
            claimed_email: None,
        }
    }

    #[tokio::test]
    async fn toggling_twice_restores_like_state() {
        let stores = Stores::new();
        let lesson = stores.seed_lesson("a@x.com", "L").await;
        let handler = ToggleLikeHandler::new(Arc::new(stores.lessons.clone()));

        let on = handler.handle(cmd("b@y.com", lesson.id)).await.unwrap();
        assert!(on.liked);
        assert_eq!(on.likes_count, 1);

        let off = handler.handle(cmd("b@y.com", lesson.id)).await.unwrap();
        assert!(!off.liked);
        assert_eq!(off.likes_count, 0);

        let stored = stores.lesson(&lesson.id).await;
        assert!(!stored.is_liked_by(&email("b@y.com")));
        assert_eq!(stored.likes_count, lesson.likes_count);
    }

    #[tokio::test]
    async fn mismatched_claimed_email_is_forbidden() {
        let stores = Stores::new();
        let lesson = stores.seed_lesson("a@x.com", "L").await;
        let handler = ToggleLikeHandler::new(Arc::new(stores.lessons.clone()));

        let err = handler
            .handle(ToggleLikeCommand {
                claimed_email: Some(email("victim@x.com")),
                ..cmd("b@y.com", lesson.id)
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(stores.lesson(&lesson.id).await.likes_count, 0);
    }

    #[tokio::test]
    async fn matching_claimed_email_is_accepted() {
        let stores = Stores::new();
        let lesson = stores.seed_lesson("a@x.com", "L").await;
        let handler = ToggleLikeHandler::new(Arc::new(stores.lessons.clone()));

        let toggle = handler
            .handle(ToggleLikeCommand {
                claimed_email: Some(email("B@y.com")),
                ..cmd("b@y.com", lesson.id)
            })
            .await
            .unwrap();
        assert!(toggle.liked);
    }

    #[tokio::test]
    async fn unknown_lesson_is_not_found() {
        let stores = Stores::new();
        let handler = ToggleLikeHandler::new(Arc::new(stores.lessons.clone()));
        let err = handler.handle(cmd("b@y.com", LessonId::new())).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::LessonNotFound);
    }
}
