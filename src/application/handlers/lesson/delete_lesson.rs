//! DeleteLessonHandler - removes a lesson and debits its creator.
//!
//! Order is read, authorize, delete, decrement. The creator email is taken
//! from the stored lesson before it is deleted; it is never supplied by
//! the client.

use std::sync::Arc;

use tracing::info;

use crate::application::access;
use crate::application::consistency::CounterAdjustments;
use crate::domain::foundation::{
    AuthenticatedUser, DerivedCounter, DomainError, LessonId, OwnedByUser,
};
use crate::domain::lesson::{lesson_not_found, Lesson};
use crate::ports::{LessonRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct DeleteLessonCommand {
    pub principal: AuthenticatedUser,
    pub lesson_id: LessonId,
}

pub struct DeleteLessonHandler {
    lessons: Arc<dyn LessonRepository>,
    users: Arc<dyn UserRepository>,
}

impl DeleteLessonHandler {
    pub fn new(lessons: Arc<dyn LessonRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { lessons, users }
    }

    /// Returns the deleted lesson.
    pub async fn handle(&self, cmd: DeleteLessonCommand) -> Result<Lesson, DomainError> {
        let lesson = self
            .lessons
            .find_by_id(&cmd.lesson_id)
            .await?
            .ok_or_else(|| lesson_not_found(&cmd.lesson_id))?;

        if !lesson.is_owner(&cmd.principal.email)
            && !access::is_admin(self.users.as_ref(), &cmd.principal).await?
        {
            lesson.check_ownership(&cmd.principal.email)?;
        }

        // A concurrent delete already debited the creator.
        if !self.lessons.delete(&cmd.lesson_id).await? {
            return Err(lesson_not_found(&cmd.lesson_id));
        }
        info!(lesson_id = %lesson.id, deleted_by = %cmd.principal.email, "lesson deleted");

        let creator = &lesson.creator_email;
        let mut counters = CounterAdjustments::new("delete lesson");
        counters
            .apply(
                DerivedCounter::LessonsCreated,
                creator,
                -1,
                self.users.adjust_lessons_created(creator, -1),
            )
            .await;
        counters
            .finish()
            .map_err(|e| e.with_detail("lessonId", lesson.id.to_string()))?;

        Ok(lesson)
    }
}
