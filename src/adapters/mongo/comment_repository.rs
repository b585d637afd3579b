//! MongoDB implementation of CommentRepository.

use async_trait::async_trait;
use bson::doc;
use futures::TryStreamExt;
use mongodb::Collection;

use crate::domain::comment::Comment;
use crate::domain::foundation::{CommentId, DomainError, LessonId};
use crate::ports::CommentRepository;

use super::client::{bounded, read_with_retry, MongoClient, StoreTimeouts};
use super::documents::CommentDoc;

pub struct MongoCommentRepository {
    collection: Collection<CommentDoc>,
    timeouts: StoreTimeouts,
}

impl MongoCommentRepository {
    pub async fn new(client: &MongoClient, name: &str) -> Result<Self, DomainError> {
        let collection = client.collection::<CommentDoc>(name);
        client.apply_indexes(&collection).await?;
        Ok(Self {
            collection,
            timeouts: client.timeouts(),
        })
    }
}

#[async_trait]
impl CommentRepository for MongoCommentRepository {
    async fn insert(&self, comment: &Comment) -> Result<(), DomainError> {
        let doc = CommentDoc::from(comment);
        bounded(&self.timeouts, "comments.insert", self.collection.insert_one(&doc)).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, DomainError> {
        let collection = &self.collection;
        let found = read_with_retry(&self.timeouts, "comments.find_by_id", move || {
            collection.find_one(doc! { "_id": id.to_string() })
        })
        .await?;
        found.map(Comment::try_from).transpose()
    }

    async fn delete(&self, id: &CommentId) -> Result<bool, DomainError> {
        let result = bounded(
            &self.timeouts,
            "comments.delete",
            self.collection.delete_one(doc! { "_id": id.to_string() }),
        )
        .await?;
        Ok(result.deleted_count > 0)
    }

    async fn list_for_lesson(&self, lesson_id: &LessonId) -> Result<Vec<Comment>, DomainError> {
        let collection = &self.collection;
        let docs: Vec<CommentDoc> =
            read_with_retry(&self.timeouts, "comments.list_for_lesson", move || async move {
                collection
                    .find(doc! { "lessonId": lesson_id.to_string() })
                    .sort(doc! { "createdAt": -1 })
                    .await?
                    .try_collect()
                    .await
            })
            .await?;
        docs.into_iter().map(Comment::try_from).collect()
    }
}
