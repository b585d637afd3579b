//! Shared fixtures for handler tests.

use async_trait::async_trait;
use std::sync::Arc;

use crate::adapters::memory::{
    InMemoryCommentRepository, InMemoryFavoriteRepository, InMemoryLessonRepository,
    InMemoryReportRepository, InMemoryUserRepository,
};
use crate::domain::foundation::{
    AuthenticatedUser, DomainError, Email, ErrorCode, LessonId, Timestamp,
};
use crate::domain::lesson::{Lesson, LessonDraft, LessonPatch, LikeToggle};
use crate::domain::user::{Role, SignIn, UpsertOutcome, User};
use crate::ports::{LessonFilter, LessonRepository, UserRepository};

pub fn email(raw: &str) -> Email {
    Email::new(raw).unwrap()
}

pub fn principal(raw: &str) -> AuthenticatedUser {
    AuthenticatedUser::new(email(raw), None, true)
}

pub fn draft(title: &str) -> LessonDraft {
    LessonDraft {
        title: title.to_string(),
        description: "What I learned".to_string(),
        category: "Career".to_string(),
        emotional_tone: "Reflective".to_string(),
        ..Default::default()
    }
}

fn simulated() -> DomainError {
    DomainError::new(ErrorCode::StorageTimeout, "Simulated counter failure")
}

#[derive(Default, Clone)]
pub struct Stores {
    pub lessons: InMemoryLessonRepository,
    pub users: InMemoryUserRepository,
    pub favorites: InMemoryFavoriteRepository,
    pub reports: InMemoryReportRepository,
    pub comments: InMemoryCommentRepository,
}

impl Stores {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sign_in(&self, raw: &str) -> User {
        let sign_in = SignIn {
            email: email(raw),
            name: None,
            photo_url: None,
        };
        self.users
            .upsert_on_login(&sign_in, Timestamp::now())
            .await
            .unwrap()
            .user
    }

    pub async fn seed_admin(&self, raw: &str) -> User {
        let mut user = self.sign_in(raw).await;
        user.role = Role::Admin;
        self.users.put(user.clone()).await;
        user
    }

    /// Stores a lesson directly, without touching any counter.
    pub async fn seed_lesson(&self, creator: &str, title: &str) -> Lesson {
        let lesson = Lesson::create(draft(title), &principal(creator), Timestamp::now()).unwrap();
        self.lessons.put(lesson.clone()).await;
        lesson
    }

    pub async fn user(&self, raw: &str) -> User {
        self.users.find_by_email(&email(raw)).await.unwrap().unwrap()
    }

    pub async fn lesson(&self, id: &LessonId) -> Lesson {
        self.lessons.find_by_id(id).await.unwrap().unwrap()
    }
}

/// User store whose counter adjustments can be made to fail.
pub struct FlakyUsers {
    pub inner: InMemoryUserRepository,
    fail_counters: bool,
}

impl FlakyUsers {
    pub fn failing(inner: InMemoryUserRepository) -> Arc<Self> {
        Arc::new(Self {
            inner,
            fail_counters: true,
        })
    }
}

#[async_trait]
impl UserRepository for FlakyUsers {
    async fn upsert_on_login(
        &self,
        sign_in: &SignIn,
        now: Timestamp,
    ) -> Result<UpsertOutcome, DomainError> {
        self.inner.upsert_on_login(sign_in, now).await
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        self.inner.find_by_email(email).await
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.inner.list().await
    }

    async fn set_premium(
        &self,
        email: &Email,
        value: bool,
        now: Timestamp,
    ) -> Result<bool, DomainError> {
        self.inner.set_premium(email, value, now).await
    }

    async fn set_role(
        &self,
        email: &Email,
        role: Role,
        now: Timestamp,
    ) -> Result<bool, DomainError> {
        self.inner.set_role(email, role, now).await
    }

    async fn adjust_lessons_created(
        &self,
        email: &Email,
        delta: i64,
    ) -> Result<bool, DomainError> {
        if self.fail_counters {
            return Err(simulated());
        }
        self.inner.adjust_lessons_created(email, delta).await
    }

    async fn adjust_lessons_saved(&self, email: &Email, delta: i64) -> Result<bool, DomainError> {
        if self.fail_counters {
            return Err(simulated());
        }
        self.inner.adjust_lessons_saved(email, delta).await
    }
}

/// Lesson store whose favorites-count adjustment can be made to fail.
pub struct FlakyLessons {
    pub inner: InMemoryLessonRepository,
    fail_counters: bool,
}

impl FlakyLessons {
    pub fn failing(inner: InMemoryLessonRepository) -> Arc<Self> {
        Arc::new(Self {
            inner,
            fail_counters: true,
        })
    }
}

#[async_trait]
impl LessonRepository for FlakyLessons {
    async fn insert(&self, lesson: &Lesson) -> Result<(), DomainError> {
        self.inner.insert(lesson).await
    }

    async fn find_by_id(&self, id: &LessonId) -> Result<Option<Lesson>, DomainError> {
        self.inner.find_by_id(id).await
    }

    async fn list(&self, filter: &LessonFilter) -> Result<Vec<Lesson>, DomainError> {
        self.inner.list(filter).await
    }

    async fn update_fields(
        &self,
        id: &LessonId,
        patch: &LessonPatch,
        now: Timestamp,
    ) -> Result<Option<Lesson>, DomainError> {
        self.inner.update_fields(id, patch, now).await
    }

    async fn delete(&self, id: &LessonId) -> Result<bool, DomainError> {
        self.inner.delete(id).await
    }

    async fn toggle_like(
        &self,
        id: &LessonId,
        email: &Email,
    ) -> Result<Option<LikeToggle>, DomainError> {
        self.inner.toggle_like(id, email).await
    }

    async fn adjust_favorites_count(
        &self,
        id: &LessonId,
        delta: i64,
    ) -> Result<bool, DomainError> {
        if self.fail_counters {
            return Err(simulated());
        }
        self.inner.adjust_favorites_count(id, delta).await
    }
}
