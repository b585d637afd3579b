//! Lesson repository port.
//!
//! Besides plain persistence the port exposes the two atomic primitives the
//! consistency engine needs on lessons: a floored favorites-count
//! adjustment and a single-step like toggle.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Email, LessonId, Timestamp};
use crate::domain::lesson::{AccessLevel, Lesson, LessonPatch, LikeToggle, Privacy};

/// Equality filters for lesson listings. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonFilter {
    pub creator_email: Option<Email>,
    pub category: Option<String>,
    pub emotional_tone: Option<String>,
    pub privacy: Option<Privacy>,
    pub access_level: Option<AccessLevel>,
}

impl LessonFilter {
    pub fn by_creator(email: Email) -> Self {
        Self {
            creator_email: Some(email),
            ..Default::default()
        }
    }

    pub fn matches(&self, lesson: &Lesson) -> bool {
        self.creator_email
            .as_ref()
            .map_or(true, |e| &lesson.creator_email == e)
            && self.category.as_ref().map_or(true, |c| &lesson.category == c)
            && self
                .emotional_tone
                .as_ref()
                .map_or(true, |t| &lesson.emotional_tone == t)
            && self.privacy.map_or(true, |p| lesson.privacy == p)
            && self.access_level.map_or(true, |a| lesson.access_level == a)
    }
}

/// Repository port for lessons.
#[async_trait]
pub trait LessonRepository: Send + Sync {
    /// Insert a new lesson.
    async fn insert(&self, lesson: &Lesson) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &LessonId) -> Result<Option<Lesson>, DomainError>;

    /// List lessons matching the filter, newest first.
    async fn list(&self, filter: &LessonFilter) -> Result<Vec<Lesson>, DomainError>;

    /// Apply a whitelisted patch and stamp `updatedDate`.
    ///
    /// Returns the updated lesson, or `None` if it does not exist.
    async fn update_fields(
        &self,
        id: &LessonId,
        patch: &LessonPatch,
        now: Timestamp,
    ) -> Result<Option<Lesson>, DomainError>;

    /// Delete a lesson. Returns false if nothing was deleted.
    async fn delete(&self, id: &LessonId) -> Result<bool, DomainError>;

    /// Atomically add or remove `email` from the like set and set
    /// `likesCount` to the resulting set size.
    ///
    /// Returns `None` if the lesson does not exist.
    async fn toggle_like(
        &self,
        id: &LessonId,
        email: &Email,
    ) -> Result<Option<LikeToggle>, DomainError>;

    /// Atomically add `delta` to `favoritesCount`, flooring at zero.
    ///
    /// Returns false if the lesson does not exist.
    async fn adjust_favorites_count(&self, id: &LessonId, delta: i64)
        -> Result<bool, DomainError>;
}
