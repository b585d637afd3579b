//! Favorites: a user's saved lessons.
//!
//! At most one favorite exists per (user, lesson) pair. The favorite
//! record is the source of truth for "is favorited"; the derived counters
//! on the lesson and the user follow it.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, Email, ErrorCode, FavoriteId, LessonId, Timestamp};
use crate::domain::lesson::Lesson;

/// Lesson fields copied onto the favorite so a saved list renders
/// without reading every lesson.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonSnapshot {
    pub title: String,
    pub image: Option<String>,
    pub category: String,
    pub emotional_tone: String,
}

impl From<&Lesson> for LessonSnapshot {
    fn from(lesson: &Lesson) -> Self {
        Self {
            title: lesson.title.clone(),
            image: lesson.image.clone(),
            category: lesson.category.clone(),
            emotional_tone: lesson.emotional_tone.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: FavoriteId,
    pub user_email: Email,
    pub lesson_id: LessonId,
    #[serde(flatten)]
    pub lesson: LessonSnapshot,
    pub created_at: Timestamp,
}

/// Result of an add-favorite call. Adding twice is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddFavoriteOutcome {
    Added(Favorite),
    AlreadyFavorited,
}

impl Favorite {
    pub fn new(user_email: Email, lesson: &Lesson, now: Timestamp) -> Self {
        Self {
            id: FavoriteId::new(),
            user_email,
            lesson_id: lesson.id,
            lesson: LessonSnapshot::from(lesson),
            created_at: now,
        }
    }
}

impl AddFavoriteOutcome {
    pub fn was_added(&self) -> bool {
        matches!(self, AddFavoriteOutcome::Added(_))
    }
}

pub fn favorite_not_found(user_email: &Email, lesson_id: &LessonId) -> DomainError {
    DomainError::new(ErrorCode::FavoriteNotFound, "Favorite not found")
        .with_detail("userEmail", user_email.to_string())
        .with_detail("lessonId", lesson_id.to_string())
}
