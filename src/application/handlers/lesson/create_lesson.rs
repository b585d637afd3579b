//! CreateLessonHandler - inserts a lesson and credits its creator.

use std::sync::Arc;

use tracing::info;

use crate::application::consistency::CounterAdjustments;
use crate::domain::foundation::{AuthenticatedUser, DerivedCounter, DomainError, Timestamp};
use crate::domain::lesson::{Lesson, LessonDraft};
use crate::ports::{LessonRepository, UserRepository};

/// Command to publish a lesson as the verified principal.
#[derive(Debug, Clone)]
pub struct CreateLessonCommand {
    pub principal: AuthenticatedUser,
    pub draft: LessonDraft,
}

pub struct CreateLessonHandler {
    lessons: Arc<dyn LessonRepository>,
    users: Arc<dyn UserRepository>,
}

impl CreateLessonHandler {
    pub fn new(lessons: Arc<dyn LessonRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { lessons, users }
    }

    /// Insert first, then increment `totalLessonsCreated`.
    ///
    /// If the increment fails the lesson still exists and the error is
    /// `PARTIAL_WRITE` carrying the new lesson id.
    pub async fn handle(&self, cmd: CreateLessonCommand) -> Result<Lesson, DomainError> {
        let lesson = Lesson::create(cmd.draft, &cmd.principal, Timestamp::now())?;
        self.lessons.insert(&lesson).await?;
        info!(lesson_id = %lesson.id, creator = %lesson.creator_email, "lesson created");

        let creator = &lesson.creator_email;
        let mut counters = CounterAdjustments::new("create lesson");
        counters
            .apply(
                DerivedCounter::LessonsCreated,
                creator,
                1,
                self.users.adjust_lessons_created(creator, 1),
            )
            .await;
        counters
            .finish()
            .map_err(|e| e.with_detail("lessonId", lesson.id.to_string()))?;

        Ok(lesson)
    }
}
