//! Lesson entity.
//!
//! # Invariants
//!
//! - `likes_count == likes.len()`
//! - `favorites_count` and `likes_count` are never negative and are only
//!   changed by the consistency engine, never by an edit

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    apply_delta, AuthenticatedUser, DomainError, Email, ErrorCode, LessonId, OwnedByUser,
    Timestamp, ValidationError,
};

use super::{AccessLevel, LikeSet, LikeToggle, Privacy};

/// A published lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub emotional_tone: String,
    pub image: Option<String>,
    pub privacy: Privacy,
    pub access_level: AccessLevel,

    /// Email of the creating user; the owner of the lesson.
    pub creator_email: Email,
    pub creator_name: Option<String>,
    pub creator_photo: Option<String>,

    pub favorites_count: u64,
    pub likes: LikeSet,
    pub likes_count: u64,

    pub created_at: Timestamp,
    pub updated_date: Option<Timestamp>,
}

/// Client-supplied content for a new lesson.
///
/// Derived counters are not part of the draft; they always start at zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub emotional_tone: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub privacy: Privacy,
    #[serde(default)]
    pub access_level: AccessLevel,
}

/// Whitelisted partial update.
///
/// Only editable content fields exist here, so an edit can never reach a
/// derived counter, the like set, or the creator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub emotional_tone: Option<String>,
    pub image: Option<String>,
    pub privacy: Option<Privacy>,
    pub access_level: Option<AccessLevel>,
}

impl Lesson {
    /// Creates a lesson owned by `creator` with all counters at zero.
    pub fn create(
        draft: LessonDraft,
        creator: &AuthenticatedUser,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let title = draft.title.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::empty_field("title"));
        }

        Ok(Self {
            id: LessonId::new(),
            title,
            description: draft.description,
            category: draft.category,
            emotional_tone: draft.emotional_tone,
            image: draft.image.filter(|url| !url.trim().is_empty()),
            privacy: draft.privacy,
            access_level: draft.access_level,
            creator_email: creator.email.clone(),
            creator_name: creator.display_name.clone(),
            creator_photo: creator.picture.clone(),
            favorites_count: 0,
            likes: LikeSet::new(),
            likes_count: 0,
            created_at: now,
            updated_date: None,
        })
    }

    /// Applies an already validated patch and stamps `updated_date`.
    pub fn apply_patch(&mut self, patch: &LessonPatch, now: Timestamp) {
        if let Some(title) = &patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(tone) = &patch.emotional_tone {
            self.emotional_tone = tone.clone();
        }
        if let Some(image) = &patch.image {
            self.image = Some(image.clone()).filter(|url| !url.trim().is_empty());
        }
        if let Some(privacy) = patch.privacy {
            self.privacy = privacy;
        }
        if let Some(access_level) = patch.access_level {
            self.access_level = access_level;
        }
        self.updated_date = Some(now);
    }

    /// Toggles `email` in the like set, keeping the count in step.
    pub fn toggle_like(&mut self, email: &Email) -> LikeToggle {
        let liked = self.likes.toggle(email);
        self.likes_count = self.likes.len() as u64;
        LikeToggle {
            liked,
            likes_count: self.likes_count,
        }
    }

    pub fn adjust_favorites_count(&mut self, delta: i64) {
        self.favorites_count = apply_delta(self.favorites_count, delta);
    }

    pub fn is_liked_by(&self, email: &Email) -> bool {
        self.likes.contains(email)
    }
}

impl OwnedByUser for Lesson {
    fn owner_email(&self) -> &Email {
        &self.creator_email
    }
}

impl LessonPatch {
    /// True if the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.emotional_tone.is_none()
            && self.image.is_none()
            && self.privacy.is_none()
            && self.access_level.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(ValidationError::empty_field("title"));
            }
        }
        Ok(())
    }
}

/// Error for a lesson id that does not resolve.
pub fn lesson_not_found(id: &LessonId) -> DomainError {
    DomainError::new(ErrorCode::LessonNotFound, format!("Lesson not found: {}", id))
        .with_detail("lessonId", id.to_string())
}
