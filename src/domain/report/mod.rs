//! Abuse reports against lessons.
//!
//! At most one report exists per (lesson, reporter) pair. Reports are
//! never deleted; admins move them between statuses.

mod status;

pub use status::ReportStatus;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, Email, ErrorCode, LessonId, ReportId, Timestamp, ValidationError,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: ReportId,
    pub lesson_id: LessonId,
    pub lesson_title: String,
    pub reporter_email: Email,
    pub reporter_name: Option<String>,
    pub reason: String,
    pub status: ReportStatus,
    pub timestamp: Timestamp,
    pub updated_at: Option<Timestamp>,
}

/// Result of a report submission. A repeat report is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitReportOutcome {
    Submitted(Report),
    Duplicate,
}

impl Report {
    /// A new pending report.
    pub fn submit(
        lesson_id: LessonId,
        lesson_title: impl Into<String>,
        reporter_email: Email,
        reporter_name: Option<String>,
        reason: impl Into<String>,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let reason = reason.into().trim().to_string();
        if reason.is_empty() {
            return Err(ValidationError::empty_field("reason"));
        }
        Ok(Self {
            id: ReportId::new(),
            lesson_id,
            lesson_title: lesson_title.into(),
            reporter_email,
            reporter_name,
            reason,
            status: ReportStatus::Pending,
            timestamp: now,
            updated_at: None,
        })
    }

    pub fn set_status(&mut self, status: ReportStatus, now: Timestamp) {
        self.status = status;
        self.updated_at = Some(now);
    }
}

pub fn report_not_found(id: &ReportId) -> DomainError {
    DomainError::new(ErrorCode::ReportNotFound, format!("Report not found: {}", id))
        .with_detail("reportId", id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reporter() -> Email {
        Email::new("b@y.com").unwrap()
    }

    #[test]
    fn submit_starts_pending() {
        let report = Report::submit(
            LessonId::new(),
            "Title",
            reporter(),
            Some("Bob".to_string()),
            "Spam",
            Timestamp::now(),
        )
        .unwrap();
        assert_eq!(report.status, ReportStatus::Pending);
        assert!(report.updated_at.is_none());
    }

    #[test]
    fn submit_requires_reason() {
        let err = Report::submit(LessonId::new(), "T", reporter(), None, "  ", Timestamp::now())
            .unwrap_err();
        assert!(matches!(err, ValidationError::EmptyField { .. }));
    }

    #[test]
    fn status_can_move_back_to_pending() {
        let mut report =
            Report::submit(LessonId::new(), "T", reporter(), None, "Abuse", Timestamp::now())
                .unwrap();
        report.set_status(ReportStatus::Resolved, Timestamp::now());
        report.set_status(ReportStatus::Pending, Timestamp::now());
        assert_eq!(report.status, ReportStatus::Pending);
        assert!(report.updated_at.is_some());
    }
}
