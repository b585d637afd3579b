//! UpdateLessonHandler - whitelisted edit by the lesson's owner.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{
    AuthenticatedUser, DomainError, LessonId, OwnedByUser, Timestamp,
};
use crate::domain::lesson::{lesson_not_found, Lesson, LessonPatch};
use crate::ports::LessonRepository;

#[derive(Debug, Clone)]
pub struct UpdateLessonCommand {
    pub principal: AuthenticatedUser,
    pub lesson_id: LessonId,
    pub patch: LessonPatch,
}

pub struct UpdateLessonHandler {
    lessons: Arc<dyn LessonRepository>,
}

impl UpdateLessonHandler {
    pub fn new(lessons: Arc<dyn LessonRepository>) -> Self {
        Self { lessons }
    }

    pub async fn handle(&self, cmd: UpdateLessonCommand) -> Result<Lesson, DomainError> {
        cmd.patch.validate()?;
        if cmd.patch.is_empty() {
            return Err(DomainError::validation("body", "No editable fields supplied"));
        }

        let lesson = self
            .lessons
            .find_by_id(&cmd.lesson_id)
            .await?
            .ok_or_else(|| lesson_not_found(&cmd.lesson_id))?;
        lesson.check_ownership(&cmd.principal.email)?;

        let updated = self
            .lessons
            .update_fields(&cmd.lesson_id, &cmd.patch, Timestamp::now())
            .await?
            .ok_or_else(|| lesson_not_found(&cmd.lesson_id))?;

        info!(lesson_id = %cmd.lesson_id, "lesson updated");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{principal, Stores};
    use crate::domain::foundation::ErrorCode;
    use crate::domain::lesson::Privacy;

    fn rename(title: &str) -> LessonPatch {
        LessonPatch {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn owner_can_edit_whitelisted_fields() {
        let stores = Stores::new();
        let mut seeded = stores.seed_lesson("a@x.com", "Old").await;
        seeded.favorites_count = 2;
        stores.lessons.put(seeded.clone()).await;

        let handler = UpdateLessonHandler::new(Arc::new(stores.lessons.clone()));
        let patch = LessonPatch {
            privacy: Some(Privacy::Private),
            ..rename("New")
        };
        let updated = handler
            .handle(UpdateLessonCommand {
                principal: principal("a@x.com"),
                lesson_id: seeded.id,
                patch,
            })
            .await
            .unwrap();

        assert_eq!(updated.title, "New");
        assert_eq!(updated.privacy, Privacy::Private);
        assert_eq!(updated.favorites_count, 2);
        assert!(updated.updated_date.is_some());
    }

    #[tokio::test]
    async fn non_owner_is_forbidden_and_nothing_changes() {
        let stores = Stores::new();
        let seeded = stores.seed_lesson("a@x.com", "Old").await;
        let handler = UpdateLessonHandler::new(Arc::new(stores.lessons.clone()));

        let err = handler
            .handle(UpdateLessonCommand {
                principal: principal("b@y.com"),
                lesson_id: seeded.id,
                patch: rename("Hijacked"),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(stores.lesson(&seeded.id).await.title, "Old");
    }

    #[tokio::test]
    async fn missing_lesson_is_not_found() {
        let stores = Stores::new();
        let handler = UpdateLessonHandler::new(Arc::new(stores.lessons.clone()));
        let err = handler
            .handle(UpdateLessonCommand {
                principal: principal("a@x.com"),
                lesson_id: LessonId::new(),
                patch: rename("x"),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::LessonNotFound);
    }

    #[tokio::test]
    async fn empty_patch_is_invalid() {
        let stores = Stores::new();
        let seeded = stores.seed_lesson("a@x.com", "Old").await;
        let handler = UpdateLessonHandler::new(Arc::new(stores.lessons.clone()));
        let err = handler
            .handle(UpdateLessonCommand {
                principal: principal("a@x.com"),
                lesson_id: seeded.id,
                patch: LessonPatch::default(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
