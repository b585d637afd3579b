//! MongoDB implementation of ReportRepository.

use async_trait::async_trait;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::options::ReturnDocument;
use mongodb::Collection;

use crate::domain::foundation::{DomainError, Email, ErrorCode, LessonId, ReportId, Timestamp};
use crate::domain::report::{Report, ReportStatus};
use crate::ports::{InsertOutcome, ReportRepository};

use super::client::{bounded, read_with_retry, MongoClient, StoreTimeouts};
use super::documents::{to_bson_date, ReportDoc};

pub struct MongoReportRepository {
    collection: Collection<ReportDoc>,
    timeouts: StoreTimeouts,
}

impl MongoReportRepository {
    pub async fn new(client: &MongoClient, name: &str) -> Result<Self, DomainError> {
        let collection = client.collection::<ReportDoc>(name);
        client.apply_indexes(&collection).await?;
        Ok(Self {
            collection,
            timeouts: client.timeouts(),
        })
    }

    async fn list(&self, operation: &'static str, filter: Document) -> Result<Vec<Report>, DomainError> {
        let collection = &self.collection;
        let filter = &filter;
        let docs: Vec<ReportDoc> = read_with_retry(&self.timeouts, operation, move || async move {
            collection
                .find(filter.clone())
                .sort(doc! { "timestamp": -1 })
                .await?
                .try_collect()
                .await
        })
        .await?;
        docs.into_iter().map(Report::try_from).collect()
    }
}

#[async_trait]
impl ReportRepository for MongoReportRepository {
    async fn insert(&self, report: &Report) -> Result<InsertOutcome, DomainError> {
        let doc = ReportDoc::from(report);
        match bounded(&self.timeouts, "reports.insert", self.collection.insert_one(&doc)).await {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(err) if err.code == ErrorCode::DuplicateKey => Ok(InsertOutcome::Duplicate),
            Err(err) => Err(err),
        }
    }

    async fn find_by_id(&self, id: &ReportId) -> Result<Option<Report>, DomainError> {
        let collection = &self.collection;
        let found = read_with_retry(&self.timeouts, "reports.find_by_id", move || {
            collection.find_one(doc! { "_id": id.to_string() })
        })
        .await?;
        found.map(Report::try_from).transpose()
    }

    async fn find_by_reporter(
        &self,
        lesson_id: &LessonId,
        reporter_email: &Email,
    ) -> Result<Option<Report>, DomainError> {
        let collection = &self.collection;
        let found = read_with_retry(&self.timeouts, "reports.find_by_reporter", move || {
            collection.find_one(doc! {
                "lessonId": lesson_id.to_string(),
                "reporterEmail": reporter_email.as_str(),
            })
        })
        .await?;
        found.map(Report::try_from).transpose()
    }

    async fn update_status(
        &self,
        id: &ReportId,
        status: ReportStatus,
        now: Timestamp,
    ) -> Result<Option<Report>, DomainError> {
        let updated = bounded(
            &self.timeouts,
            "reports.update_status",
            self.collection
                .find_one_and_update(
                    doc! { "_id": id.to_string() },
                    doc! { "$set": { "status": status.as_str(), "updatedAt": to_bson_date(&now) } },
                )
                .return_document(ReturnDocument::After),
        )
        .await?;
        updated.map(Report::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Report>, DomainError> {
        self.list("reports.list_all", doc! {}).await
    }

    async fn list_for_lesson(&self, lesson_id: &LessonId) -> Result<Vec<Report>, DomainError> {
        self.list("reports.list_for_lesson", doc! { "lessonId": lesson_id.to_string() })
            .await
    }
}
