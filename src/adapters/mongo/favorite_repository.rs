//! MongoDB implementation of FavoriteRepository.
//!
//! Uniqueness of (userEmail, lessonId) is the unique index; a violation
//! on insert is reported as a duplicate rather than an error.

use async_trait::async_trait;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::Collection;

use crate::domain::favorite::Favorite;
use crate::domain::foundation::{DomainError, Email, ErrorCode, LessonId};
use crate::ports::{FavoriteRepository, InsertOutcome};

use super::client::{bounded, read_with_retry, MongoClient, StoreTimeouts};
use super::documents::FavoriteDoc;

pub struct MongoFavoriteRepository {
    collection: Collection<FavoriteDoc>,
    timeouts: StoreTimeouts,
}

impl MongoFavoriteRepository {
    pub async fn new(client: &MongoClient, name: &str) -> Result<Self, DomainError> {
        let collection = client.collection::<FavoriteDoc>(name);
        client.apply_indexes(&collection).await?;
        Ok(Self {
            collection,
            timeouts: client.timeouts(),
        })
    }
}

fn pair(user_email: &Email, lesson_id: &LessonId) -> Document {
    doc! { "userEmail": user_email.as_str(), "lessonId": lesson_id.to_string() }
}

#[async_trait]
impl FavoriteRepository for MongoFavoriteRepository {
    async fn insert(&self, favorite: &Favorite) -> Result<InsertOutcome, DomainError> {
        let doc = FavoriteDoc::from(favorite);
        match bounded(&self.timeouts, "favorites.insert", self.collection.insert_one(&doc)).await {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(err) if err.code == ErrorCode::DuplicateKey => Ok(InsertOutcome::Duplicate),
            Err(err) => Err(err),
        }
    }

    async fn find(
        &self,
        user_email: &Email,
        lesson_id: &LessonId,
    ) -> Result<Option<Favorite>, DomainError> {
        let collection = &self.collection;
        let found = read_with_retry(&self.timeouts, "favorites.find", move || {
            collection.find_one(pair(user_email, lesson_id))
        })
        .await?;
        found.map(Favorite::try_from).transpose()
    }

    async fn delete(&self, user_email: &Email, lesson_id: &LessonId) -> Result<bool, DomainError> {
        let result = bounded(
            &self.timeouts,
            "favorites.delete",
            self.collection.delete_one(pair(user_email, lesson_id)),
        )
        .await?;
        Ok(result.deleted_count > 0)
    }

    async fn list_by_user(&self, user_email: &Email) -> Result<Vec<Favorite>, DomainError> {
        let collection = &self.collection;
        let docs: Vec<FavoriteDoc> =
            read_with_retry(&self.timeouts, "favorites.list_by_user", move || async move {
                collection
                    .find(doc! { "userEmail": user_email.as_str() })
                    .sort(doc! { "createdAt": -1 })
                    .await?
                    .try_collect()
                    .await
            })
            .await?;
        docs.into_iter().map(Favorite::try_from).collect()
    }
}
