//! Report repository port.

use async_trait::async_trait;

use super::InsertOutcome;
use crate::domain::foundation::{DomainError, Email, LessonId, ReportId, Timestamp};
use crate::domain::report::{Report, ReportStatus};

/// Implementations must enforce uniqueness of (lessonId, reporterEmail) and
/// report a violation as `InsertOutcome::Duplicate`.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn insert(&self, report: &Report) -> Result<InsertOutcome, DomainError>;

    async fn find_by_id(&self, id: &ReportId) -> Result<Option<Report>, DomainError>;

    async fn find_by_reporter(
        &self,
        lesson_id: &LessonId,
        reporter_email: &Email,
    ) -> Result<Option<Report>, DomainError>;

    /// Returns the updated report, or `None` if the id does not resolve.
    async fn update_status(
        &self,
        id: &ReportId,
        status: ReportStatus,
        now: Timestamp,
    ) -> Result<Option<Report>, DomainError>;

    /// All reports, newest `timestamp` first.
    async fn list_all(&self) -> Result<Vec<Report>, DomainError>;

    /// Reports against one lesson, newest `timestamp` first.
    async fn list_for_lesson(&self, lesson_id: &LessonId) -> Result<Vec<Report>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ReportRepository) {}
    }
}
