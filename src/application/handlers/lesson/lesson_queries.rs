//! Lesson read paths. No side effects.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, LessonId};
use crate::domain::lesson::{lesson_not_found, Lesson};
use crate::ports::{LessonFilter, LessonRepository};

pub struct GetLessonHandler {
    lessons: Arc<dyn LessonRepository>,
}

impl GetLessonHandler {
    pub fn new(lessons: Arc<dyn LessonRepository>) -> Self {
        Self { lessons }
    }

    pub async fn handle(&self, lesson_id: LessonId) -> Result<Lesson, DomainError> {
        self.lessons
            .find_by_id(&lesson_id)
            .await?
            .ok_or_else(|| lesson_not_found(&lesson_id))
    }
}

pub struct ListLessonsHandler {
    lessons: Arc<dyn LessonRepository>,
}

impl ListLessonsHandler {
    pub fn new(lessons: Arc<dyn LessonRepository>) -> Self {
        Self { lessons }
    }

    pub async fn handle(&self, filter: LessonFilter) -> Result<Vec<Lesson>, DomainError> {
        self.lessons.list(&filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{email, Stores};
    use crate::domain::foundation::ErrorCode;

    #[tokio::test]
    async fn get_returns_stored_lesson() {
        let stores = Stores::new();
        let lesson = stores.seed_lesson("a@x.com", "L").await;
        let found = GetLessonHandler::new(Arc::new(stores.lessons.clone()))
            .handle(lesson.id)
            .await
            .unwrap();
        assert_eq!(found, lesson);
    }

    #[tokio::test]
    async fn get_unknown_is_not_found() {
        let stores = Stores::new();
        let err = GetLessonHandler::new(Arc::new(stores.lessons.clone()))
            .handle(LessonId::new())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::LessonNotFound);
    }

    #[tokio::test]
    async fn list_by_creator() {
        let stores = Stores::new();
        stores.seed_lesson("a@x.com", "one").await;
        stores.seed_lesson("a@x.com", "two").await;
        stores.seed_lesson("b@y.com", "three").await;

        let handler = ListLessonsHandler::new(Arc::new(stores.lessons.clone()));
        let mine = handler
            .handle(LessonFilter::by_creator(email("a@x.com")))
            .await
            .unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(handler.handle(LessonFilter::default()).await.unwrap().len(), 3);
    }
}
