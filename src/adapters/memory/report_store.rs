use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::newest_first;
use crate::domain::foundation::{DomainError, Email, LessonId, ReportId, Timestamp};
use crate::domain::report::{Report, ReportStatus};
use crate::ports::{InsertOutcome, ReportRepository};

#[derive(Debug, Clone, Default)]
pub struct InMemoryReportRepository {
    reports: Arc<RwLock<Vec<Report>>>,
}

impl InMemoryReportRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.reports.write().await.clear();
    }

    pub async fn count(&self) -> usize {
        self.reports.read().await.len()
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn insert(&self, report: &Report) -> Result<InsertOutcome, DomainError> {
        let mut reports = self.reports.write().await;
        let exists = reports.iter().any(|r| {
            r.lesson_id == report.lesson_id && r.reporter_email == report.reporter_email
        });
        if exists {
            return Ok(InsertOutcome::Duplicate);
        }
        reports.push(report.clone());
        Ok(InsertOutcome::Inserted)
    }

    async fn find_by_id(&self, id: &ReportId) -> Result<Option<Report>, DomainError> {
        Ok(self.reports.read().await.iter().find(|r| &r.id == id).cloned())
    }

    async fn find_by_reporter(
        &self,
        lesson_id: &LessonId,
        reporter_email: &Email,
    ) -> Result<Option<Report>, DomainError> {
        Ok(self
            .reports
            .read()
            .await
            .iter()
            .find(|r| &r.lesson_id == lesson_id && &r.reporter_email == reporter_email)
            .cloned())
    }

    async fn update_status(
        &self,
        id: &ReportId,
        status: ReportStatus,
        now: Timestamp,
    ) -> Result<Option<Report>, DomainError> {
        let mut reports = self.reports.write().await;
        Ok(reports.iter_mut().find(|r| &r.id == id).map(|report| {
            report.set_status(status, now);
            report.clone()
        }))
    }

    async fn list_all(&self) -> Result<Vec<Report>, DomainError> {
        let reports = self.reports.read().await;
        Ok(newest_first(&reports, |r| r.timestamp))
    }

    async fn list_for_lesson(&self, lesson_id: &LessonId) -> Result<Vec<Report>, DomainError> {
        let reports = self.reports.read().await;
        let matching: Vec<Report> = reports
            .iter()
            .filter(|r| &r.lesson_id == lesson_id)
            .cloned()
            .collect();
        Ok(newest_first(&matching, |r| r.timestamp))
    }
}
