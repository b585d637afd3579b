//! MongoDB implementation of LessonRepository.

use async_trait::async_trait;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::options::ReturnDocument;
use mongodb::Collection;

use crate::domain::foundation::{DomainError, Email, LessonId, Timestamp};
use crate::domain::lesson::{Lesson, LessonPatch, LikeToggle};
use crate::ports::{LessonFilter, LessonRepository};

use super::client::{bounded, read_with_retry, MongoClient, StoreTimeouts};
use super::documents::{to_bson_date, LessonDoc};
use super::pipelines;

pub struct MongoLessonRepository {
    collection: Collection<LessonDoc>,
    timeouts: StoreTimeouts,
}

impl MongoLessonRepository {
    /// Opens the collection and ensures its indexes.
    pub async fn new(client: &MongoClient, name: &str) -> Result<Self, DomainError> {
        let collection = client.collection::<LessonDoc>(name);
        client.apply_indexes(&collection).await?;
        Ok(Self {
            collection,
            timeouts: client.timeouts(),
        })
    }
}

fn by_id(id: &LessonId) -> Document {
    doc! { "_id": id.to_string() }
}

fn filter_document(filter: &LessonFilter) -> Document {
    let mut query = Document::new();
    if let Some(email) = &filter.creator_email {
        query.insert("creatorEmail", email.as_str());
    }
    if let Some(category) = &filter.category {
        query.insert("category", category.as_str());
    }
    if let Some(tone) = &filter.emotional_tone {
        query.insert("emotionalTone", tone.as_str());
    }
    if let Some(privacy) = filter.privacy {
        query.insert("privacy", privacy.as_str());
    }
    if let Some(access_level) = filter.access_level {
        query.insert("accessLevel", access_level.as_str());
    }
    query
}

fn patch_document(patch: &LessonPatch, now: Timestamp) -> Document {
    let mut set = Document::new();
    if let Some(title) = &patch.title {
        set.insert("title", title.trim());
    }
    if let Some(description) = &patch.description {
        set.insert("description", description.as_str());
    }
    if let Some(category) = &patch.category {
        set.insert("category", category.as_str());
    }
    if let Some(tone) = &patch.emotional_tone {
        set.insert("emotionalTone", tone.as_str());
    }
    if let Some(image) = &patch.image {
        match image.trim() {
            "" => set.insert("image", bson::Bson::Null),
            url => set.insert("image", url),
        };
    }
    if let Some(privacy) = patch.privacy {
        set.insert("privacy", privacy.as_str());
    }
    if let Some(access_level) = patch.access_level {
        set.insert("accessLevel", access_level.as_str());
    }
    set.insert("updatedDate", to_bson_date(&now));
    doc! { "$set": set }
}

#[async_trait]
impl LessonRepository for MongoLessonRepository {
    async fn insert(&self, lesson: &Lesson) -> Result<(), DomainError> {
        let doc = LessonDoc::from(lesson);
        bounded(&self.timeouts, "lessons.insert", self.collection.insert_one(&doc)).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &LessonId) -> Result<Option<Lesson>, DomainError> {
        let collection = &self.collection;
        let found = read_with_retry(&self.timeouts, "lessons.find_by_id", move || {
            collection.find_one(by_id(id))
        })
        .await?;
        found.map(Lesson::try_from).transpose()
    }

    async fn list(&self, filter: &LessonFilter) -> Result<Vec<Lesson>, DomainError> {
        let collection = &self.collection;
        let query = &filter_document(filter);
        let docs: Vec<LessonDoc> = read_with_retry(&self.timeouts, "lessons.list", move || async move {
            collection
                .find(query.clone())
                .sort(doc! { "createdAt": -1 })
                .await?
                .try_collect()
                .await
        })
        .await?;
        docs.into_iter().map(Lesson::try_from).collect()
    }

    async fn update_fields(
        &self,
        id: &LessonId,
        patch: &LessonPatch,
        now: Timestamp,
    ) -> Result<Option<Lesson>, DomainError> {
        let updated = bounded(
            &self.timeouts,
            "lessons.update_fields",
            self.collection
                .find_one_and_update(by_id(id), patch_document(patch, now))
                .return_document(ReturnDocument::After),
        )
        .await?;
        updated.map(Lesson::try_from).transpose()
    }

    async fn delete(&self, id: &LessonId) -> Result<bool, DomainError> {
        let result = bounded(
            &self.timeouts,
            "lessons.delete",
            self.collection.delete_one(by_id(id)),
        )
        .await?;
        Ok(result.deleted_count > 0)
    }

    async fn toggle_like(
        &self,
        id: &LessonId,
        email: &Email,
    ) -> Result<Option<LikeToggle>, DomainError> {
        let updated = bounded(
            &self.timeouts,
            "lessons.toggle_like",
            self.collection
                .find_one_and_update(by_id(id), pipelines::toggle_like(email.as_str()))
                .return_document(ReturnDocument::After),
        )
        .await?;

        Ok(updated.map(|doc| LikeToggle {
            liked: doc.likes.iter().any(|liked| liked == email.as_str()),
            likes_count: u64::try_from(doc.likes_count).unwrap_or(0),
        }))
    }

    async fn adjust_favorites_count(&self, id: &LessonId, delta: i64) -> Result<bool, DomainError> {
        let result = bounded(
            &self.timeouts,
            "lessons.adjust_favorites_count",
            self.collection
                .update_one(by_id(id), pipelines::floored_add("favoritesCount", delta)),
        )
        .await?;
        Ok(result.matched_count > 0)
    }
}
