use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, Email, LessonId, Timestamp};
use crate::domain::lesson::{Lesson, LessonPatch, LikeToggle};
use crate::ports::{LessonFilter, LessonRepository};

#[derive(Debug, Clone, Default)]
pub struct InMemoryLessonRepository {
    lessons: Arc<RwLock<HashMap<LessonId, Lesson>>>,
}

impl InMemoryLessonRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.lessons.write().await.clear();
    }

    pub async fn count(&self) -> usize {
        self.lessons.read().await.len()
    }

    /// Overwrite a stored lesson as-is, bypassing the engine (test setup).
    pub async fn put(&self, lesson: Lesson) {
        self.lessons.write().await.insert(lesson.id, lesson);
    }
}

#[async_trait]
impl LessonRepository for InMemoryLessonRepository {
    async fn insert(&self, lesson: &Lesson) -> Result<(), DomainError> {
        self.lessons.write().await.insert(lesson.id, lesson.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &LessonId) -> Result<Option<Lesson>, DomainError> {
        Ok(self.lessons.read().await.get(id).cloned())
    }

    async fn list(&self, filter: &LessonFilter) -> Result<Vec<Lesson>, DomainError> {
        let lessons = self.lessons.read().await;
        let mut out: Vec<Lesson> = lessons.values().filter(|l| filter.matches(l)).cloned().collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    async fn update_fields(
        &self,
        id: &LessonId,
        patch: &LessonPatch,
        now: Timestamp,
    ) -> Result<Option<Lesson>, DomainError> {
        let mut lessons = self.lessons.write().await;
        Ok(lessons.get_mut(id).map(|lesson| {
            lesson.apply_patch(patch, now);
            lesson.clone()
        }))
    }

    async fn delete(&self, id: &LessonId) -> Result<bool, DomainError> {
        Ok(self.lessons.write().await.remove(id).is_some())
    }

    async fn toggle_like(
        &self,
        id: &LessonId,
        email: &Email,
    ) -> Result<Option<LikeToggle>, DomainError> {
        let mut lessons = self.lessons.write().await;
        Ok(lessons.get_mut(id).map(|lesson| lesson.toggle_like(email)))
    }

    async fn adjust_favorites_count(
        &self,
        id: &LessonId,
        delta: i64,
    ) -> Result<bool, DomainError> {
        let mut lessons = self.lessons.write().await;
        match lessons.get_mut(id) {
            Some(lesson) => {
                lesson.adjust_favorites_count(delta);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
