//! SubmitReportHandler - one report per (lesson, reporter).

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{AuthenticatedUser, DomainError, LessonId, Timestamp};
use crate::domain::lesson::lesson_not_found;
use crate::domain::report::{Report, SubmitReportOutcome};
use crate::ports::{InsertOutcome, LessonRepository, ReportRepository};

#[derive(Debug, Clone)]
pub struct SubmitReportCommand {
    pub principal: AuthenticatedUser,
    pub lesson_id: LessonId,
    pub reason: String,
}

pub struct SubmitReportHandler {
    reports: Arc<dyn ReportRepository>,
    lessons: Arc<dyn LessonRepository>,
}

impl SubmitReportHandler {
    pub fn new(reports: Arc<dyn ReportRepository>, lessons: Arc<dyn LessonRepository>) -> Self {
        Self { reports, lessons }
    }

    pub async fn handle(&self, cmd: SubmitReportCommand) -> Result<SubmitReportOutcome, DomainError> {
        let lesson = self
            .lessons
            .find_by_id(&cmd.lesson_id)
            .await?
            .ok_or_else(|| lesson_not_found(&cmd.lesson_id))?;

        if self
            .reports
            .find_by_reporter(&lesson.id, &cmd.principal.email)
            .await?
            .is_some()
        {
            return Ok(SubmitReportOutcome::Duplicate);
        }

        let report = Report::submit(
            lesson.id,
            lesson.title,
            cmd.principal.email.clone(),
            cmd.principal.display_name.clone(),
            cmd.reason,
            Timestamp::now(),
        )?;

        match self.reports.insert(&report).await? {
            InsertOutcome::Duplicate => Ok(SubmitReportOutcome::Duplicate),
            InsertOutcome::Inserted => {
                info!(report_id = %report.id, lesson_id = %report.lesson_id, "lesson reported");
                Ok(SubmitReportOutcome::Submitted(report))
            }
        }
    }
}
