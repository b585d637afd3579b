//! MongoDB implementation of UserRepository.

use async_trait::async_trait;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::options::ReturnDocument;
use mongodb::Collection;
use tracing::debug;

use crate::domain::foundation::{DomainError, Email, ErrorCode, Timestamp};
use crate::domain::user::{Role, SignIn, UpsertOutcome, User};
use crate::ports::UserRepository;

use super::client::{bounded, read_with_retry, MongoClient, StoreTimeouts};
use super::documents::{to_bson_date, UserDoc};
use super::pipelines;

pub struct MongoUserRepository {
    collection: Collection<UserDoc>,
    timeouts: StoreTimeouts,
}

impl MongoUserRepository {
    pub async fn new(client: &MongoClient, name: &str) -> Result<Self, DomainError> {
        let collection = client.collection::<UserDoc>(name);
        client.apply_indexes(&collection).await?;
        Ok(Self {
            collection,
            timeouts: client.timeouts(),
        })
    }

    async fn set_fields(
        &self,
        operation: &'static str,
        email: &Email,
        set: Document,
    ) -> Result<bool, DomainError> {
        let result = bounded(
            &self.timeouts,
            operation,
            self.collection
                .update_one(by_email(email), doc! { "$set": set }),
        )
        .await?;
        Ok(result.matched_count > 0)
    }

    async fn adjust(
        &self,
        operation: &'static str,
        email: &Email,
        field: &str,
        delta: i64,
    ) -> Result<bool, DomainError> {
        let result = bounded(
            &self.timeouts,
            operation,
            self.collection
                .update_one(by_email(email), pipelines::floored_add(field, delta)),
        )
        .await?;
        Ok(result.matched_count > 0)
    }
}

fn by_email(email: &Email) -> Document {
    doc! { "email": email.as_str() }
}

/// `$setOnInsert` defaults plus `$set updatedAt`, as one upsert.
fn upsert_document(fresh: &UserDoc, now: Timestamp) -> Result<Document, DomainError> {
    let mut on_insert = bson::to_document(fresh)
        .map_err(|e| DomainError::database(format!("Failed to encode user: {}", e)))?;
    on_insert.remove("updatedAt");
    Ok(doc! {
        "$setOnInsert": on_insert,
        "$set": { "updatedAt": to_bson_date(&now) },
    })
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn upsert_on_login(
        &self,
        sign_in: &SignIn,
        now: Timestamp,
    ) -> Result<UpsertOutcome, DomainError> {
        let fresh = UserDoc::from(&User::register(sign_in.clone(), now));
        let update = upsert_document(&fresh, now)?;

        let attempt = bounded(
            &self.timeouts,
            "users.upsert_on_login",
            self.collection
                .find_one_and_update(by_email(&sign_in.email), update)
                .upsert(true)
                .return_document(ReturnDocument::After),
        )
        .await;

        let stored = match attempt {
            Ok(stored) => stored,
            // A concurrent first login won the insert; the row exists now.
            Err(err) if err.code == ErrorCode::DuplicateKey => {
                debug!(email = %sign_in.email, "upsert raced; touching existing user");
                bounded(
                    &self.timeouts,
                    "users.upsert_on_login",
                    self.collection
                        .find_one_and_update(
                            by_email(&sign_in.email),
                            doc! { "$set": { "updatedAt": to_bson_date(&now) } },
                        )
                        .return_document(ReturnDocument::After),
                )
                .await?
            }
            Err(err) => return Err(err),
        };

        let stored = stored.ok_or_else(|| {
            DomainError::database(format!("Upsert returned no document for {}", sign_in.email))
        })?;
        let created = stored.id == fresh.id;
        Ok(UpsertOutcome {
            user: User::try_from(stored)?,
            created,
        })
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        let collection = &self.collection;
        let found = read_with_retry(&self.timeouts, "users.find_by_email", move || {
            collection.find_one(by_email(email))
        })
        .await?;
        found.map(User::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let collection = &self.collection;
        let docs: Vec<UserDoc> = read_with_retry(&self.timeouts, "users.list", move || async move {
            collection
                .find(doc! {})
                .sort(doc! { "createdAt": -1 })
                .await?
                .try_collect()
                .await
        })
        .await?;
        docs.into_iter().map(User::try_from).collect()
    }

    async fn set_premium(
        &self,
        email: &Email,
        value: bool,
        now: Timestamp,
    ) -> Result<bool, DomainError> {
        self.set_fields(
            "users.set_premium",
            email,
            doc! { "isPremium": value, "updatedAt": to_bson_date(&now) },
        )
        .await
    }

    async fn set_role(&self, email: &Email, role: Role, now: Timestamp) -> Result<bool, DomainError> {
        self.set_fields(
            "users.set_role",
            email,
            doc! { "role": role.as_str(), "updatedAt": to_bson_date(&now) },
        )
        .await
    }

    async fn adjust_lessons_created(&self, email: &Email, delta: i64) -> Result<bool, DomainError> {
        self.adjust("users.adjust_lessons_created", email, "totalLessonsCreated", delta)
            .await
    }

    async fn adjust_lessons_saved(&self, email: &Email, delta: i64) -> Result<bool, DomainError> {
        self.adjust("users.adjust_lessons_saved", email, "totalLessonsSaved", delta)
            .await
    }
}
