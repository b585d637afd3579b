//! Report listings for moderators. Newest first.

use std::sync::Arc;

use crate::application::access;
use crate::domain::foundation::{AuthenticatedUser, DomainError, LessonId};
use crate::domain::report::Report;
use crate::ports::{ReportRepository, UserRepository};

pub struct ListReportsHandler {
    reports: Arc<dyn ReportRepository>,
    users: Arc<dyn UserRepository>,
}

impl ListReportsHandler {
    pub fn new(reports: Arc<dyn ReportRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { reports, users }
    }

    /// All reports, or only those against `lesson_id`.
    pub async fn handle(
        &self,
        principal: &AuthenticatedUser,
        lesson_id: Option<LessonId>,
    ) -> Result<Vec<Report>, DomainError> {
        access::require_admin(self.users.as_ref(), principal).await?;
        match lesson_id {
            Some(id) => self.reports.list_for_lesson(&id).await,
            None => self.reports.list_all().await,
        }
    }
}
