//! Stored document shapes.
//!
//! Documents use camelCase field names and string `_id`s. Conversions
//! into domain types re-validate ids and emails; a document that fails
//! is reported as a database error rather than silently skipped.

use bson::{doc, DateTime, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::domain::comment::Comment;
use crate::domain::favorite::{Favorite, LessonSnapshot};
use crate::domain::foundation::{
    CommentId, DomainError, Email, FavoriteId, LessonId, ReportId, Timestamp, UserRecordId,
};
use crate::domain::lesson::{AccessLevel, Lesson, LikeSet, Privacy};
use crate::domain::report::{Report, ReportStatus};
use crate::domain::user::{Role, User};

use super::client::IntoIndexes;

pub(crate) fn to_bson_date(ts: &Timestamp) -> DateTime {
    DateTime::from_chrono(*ts.as_datetime())
}

pub(crate) fn from_bson_date(dt: DateTime) -> Timestamp {
    Timestamp::from_datetime(dt.to_chrono())
}

fn corrupt(field: &str, err: impl std::fmt::Display) -> DomainError {
    DomainError::database(format!("Stored document has invalid {}: {}", field, err))
        .with_detail("field", field)
}

fn email(field: &str, raw: String) -> Result<Email, DomainError> {
    Email::new(raw).map_err(|e| corrupt(field, e))
}

fn counter(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

fn stored_counter(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn unique(name: &str) -> Option<IndexOptions> {
    Some(IndexOptions::builder().unique(true).name(name.to_string()).build())
}

fn named(name: &str) -> Option<IndexOptions> {
    Some(IndexOptions::builder().name(name.to_string()).build())
}

// Lessons

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonDoc {
    #[serde(rename = "_id")]
    pub id: String,
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
    pub creator_email: String,
    #[serde(default)]
    pub creator_name: Option<String>,
    #[serde(default)]
    pub creator_photo: Option<String>,
    #[serde(default)]
    pub favorites_count: i64,
    #[serde(default)]
    pub likes: Vec<String>,
    #[serde(default)]
    pub likes_count: i64,
    pub created_at: DateTime,
    #[serde(default)]
    pub updated_date: Option<DateTime>,
}

impl From<&Lesson> for LessonDoc {
    fn from(lesson: &Lesson) -> Self {
        Self {
            id: lesson.id.to_string(),
            title: lesson.title.clone(),
            description: lesson.description.clone(),
            category: lesson.category.clone(),
            emotional_tone: lesson.emotional_tone.clone(),
            image: lesson.image.clone(),
            privacy: lesson.privacy,
            access_level: lesson.access_level,
            creator_email: lesson.creator_email.to_string(),
            creator_name: lesson.creator_name.clone(),
            creator_photo: lesson.creator_photo.clone(),
            favorites_count: stored_counter(lesson.favorites_count),
            likes: lesson.likes.iter().map(|e| e.to_string()).collect(),
            likes_count: stored_counter(lesson.likes_count),
            created_at: to_bson_date(&lesson.created_at),
            updated_date: lesson.updated_date.as_ref().map(to_bson_date),
        }
    }
}

impl TryFrom<LessonDoc> for Lesson {
    type Error = DomainError;

    fn try_from(doc: LessonDoc) -> Result<Self, Self::Error> {
        let likes = doc
            .likes
            .into_iter()
            .map(|raw| email("likes", raw))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Lesson {
            id: LessonId::parse(&doc.id).map_err(|e| corrupt("_id", e))?,
            title: doc.title,
            description: doc.description,
            category: doc.category,
            emotional_tone: doc.emotional_tone,
            image: doc.image,
            privacy: doc.privacy,
            access_level: doc.access_level,
            creator_email: email("creatorEmail", doc.creator_email)?,
            creator_name: doc.creator_name,
            creator_photo: doc.creator_photo,
            favorites_count: counter(doc.favorites_count),
            likes: LikeSet::from_emails(likes),
            likes_count: counter(doc.likes_count),
            created_at: from_bson_date(doc.created_at),
            updated_date: doc.updated_date.map(from_bson_date),
        })
    }
}

impl IntoIndexes for LessonDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![
            (doc! { "creatorEmail": 1, "createdAt": -1 }, named("creator_recent")),
            (doc! { "createdAt": -1 }, named("recent")),
        ]
    }
}

// Users

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDoc {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub total_lessons_created: i64,
    #[serde(default)]
    pub total_lessons_saved: i64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl From<&User> for UserDoc {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.to_string(),
            name: user.name.clone(),
            photo_url: user.photo_url.clone(),
            role: user.role,
            is_premium: user.is_premium,
            total_lessons_created: stored_counter(user.total_lessons_created),
            total_lessons_saved: stored_counter(user.total_lessons_saved),
            created_at: to_bson_date(&user.created_at),
            updated_at: to_bson_date(&user.updated_at),
        }
    }
}

impl TryFrom<UserDoc> for User {
    type Error = DomainError;

    fn try_from(doc: UserDoc) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserRecordId::parse(&doc.id).map_err(|e| corrupt("_id", e))?,
            email: email("email", doc.email)?,
            name: doc.name,
            photo_url: doc.photo_url,
            role: doc.role,
            is_premium: doc.is_premium,
            total_lessons_created: counter(doc.total_lessons_created),
            total_lessons_saved: counter(doc.total_lessons_saved),
            created_at: from_bson_date(doc.created_at),
            updated_at: from_bson_date(doc.updated_at),
        })
    }
}

impl IntoIndexes for UserDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![(doc! { "email": 1 }, unique("email_unique"))]
    }
}

// Favorites

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteDoc {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_email: String,
    pub lesson_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub emotional_tone: String,
    pub created_at: DateTime,
}

impl From<&Favorite> for FavoriteDoc {
    fn from(favorite: &Favorite) -> Self {
        Self {
            id: favorite.id.to_string(),
            user_email: favorite.user_email.to_string(),
            lesson_id: favorite.lesson_id.to_string(),
            title: favorite.lesson.title.clone(),
            image: favorite.lesson.image.clone(),
            category: favorite.lesson.category.clone(),
            emotional_tone: favorite.lesson.emotional_tone.clone(),
            created_at: to_bson_date(&favorite.created_at),
        }
    }
}

impl TryFrom<FavoriteDoc> for Favorite {
    type Error = DomainError;

    fn try_from(doc: FavoriteDoc) -> Result<Self, Self::Error> {
        Ok(Favorite {
            id: FavoriteId::parse(&doc.id).map_err(|e| corrupt("_id", e))?,
            user_email: email("userEmail", doc.user_email)?,
            lesson_id: LessonId::parse(&doc.lesson_id).map_err(|e| corrupt("lessonId", e))?,
            lesson: LessonSnapshot {
                title: doc.title,
                image: doc.image,
                category: doc.category,
                emotional_tone: doc.emotional_tone,
            },
            created_at: from_bson_date(doc.created_at),
        })
    }
}

impl IntoIndexes for FavoriteDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![
            (
                doc! { "userEmail": 1, "lessonId": 1 },
                unique("user_lesson_unique"),
            ),
            (doc! { "userEmail": 1, "createdAt": -1 }, named("user_recent")),
        ]
    }
}

// Reports

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDoc {
    #[serde(rename = "_id")]
    pub id: String,
    pub lesson_id: String,
    #[serde(default)]
    pub lesson_title: String,
    pub reporter_email: String,
    #[serde(default)]
    pub reporter_name: Option<String>,
    pub reason: String,
    #[serde(default)]
    pub status: ReportStatus,
    pub timestamp: DateTime,
    #[serde(default)]
    pub updated_at: Option<DateTime>,
}

impl From<&Report> for ReportDoc {
    fn from(report: &Report) -> Self {
        Self {
            id: report.id.to_string(),
            lesson_id: report.lesson_id.to_string(),
            lesson_title: report.lesson_title.clone(),
            reporter_email: report.reporter_email.to_string(),
            reporter_name: report.reporter_name.clone(),
            reason: report.reason.clone(),
            status: report.status,
            timestamp: to_bson_date(&report.timestamp),
            updated_at: report.updated_at.as_ref().map(to_bson_date),
        }
    }
}

impl TryFrom<ReportDoc> for Report {
    type Error = DomainError;

    fn try_from(doc: ReportDoc) -> Result<Self, Self::Error> {
        Ok(Report {
            id: ReportId::parse(&doc.id).map_err(|e| corrupt("_id", e))?,
            lesson_id: LessonId::parse(&doc.lesson_id).map_err(|e| corrupt("lessonId", e))?,
            lesson_title: doc.lesson_title,
            reporter_email: email("reporterEmail", doc.reporter_email)?,
            reporter_name: doc.reporter_name,
            reason: doc.reason,
            status: doc.status,
            timestamp: from_bson_date(doc.timestamp),
            updated_at: doc.updated_at.map(from_bson_date),
        })
    }
}

impl IntoIndexes for ReportDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![
            (
                doc! { "lessonId": 1, "reporterEmail": 1 },
                unique("lesson_reporter_unique"),
            ),
            (doc! { "timestamp": -1 }, named("recent")),
        ]
    }
}

// Comments

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDoc {
    #[serde(rename = "_id")]
    pub id: String,
    pub lesson_id: String,
    pub user_email: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_photo: Option<String>,
    pub comment: String,
    pub created_at: DateTime,
}

impl From<&Comment> for CommentDoc {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            lesson_id: comment.lesson_id.to_string(),
            user_email: comment.user_email.to_string(),
            user_name: comment.user_name.clone(),
            user_photo: comment.user_photo.clone(),
            comment: comment.comment.clone(),
            created_at: to_bson_date(&comment.created_at),
        }
    }
}

impl TryFrom<CommentDoc> for Comment {
    type Error = DomainError;

    fn try_from(doc: CommentDoc) -> Result<Self, Self::Error> {
        Ok(Comment {
            id: CommentId::parse(&doc.id).map_err(|e| corrupt("_id", e))?,
            lesson_id: LessonId::parse(&doc.lesson_id).map_err(|e| corrupt("lessonId", e))?,
            user_email: email("userEmail", doc.user_email)?,
            user_name: doc.user_name,
            user_photo: doc.user_photo,
            comment: doc.comment,
            created_at: from_bson_date(doc.created_at),
        })
    }
}

impl IntoIndexes for CommentDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![(doc! { "lessonId": 1, "createdAt": -1 }, named("lesson_recent"))]
    }
}
