//! UpdateReportStatusHandler - admin moderation.

use std::sync::Arc;

use tracing::info;

use crate::application::access;
use crate::domain::foundation::{AuthenticatedUser, DomainError, ReportId, Timestamp};
use crate::domain::report::{report_not_found, Report, ReportStatus};
use crate::ports::{ReportRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct UpdateReportStatusCommand {
    pub principal: AuthenticatedUser,
    pub report_id: ReportId,
    pub status: ReportStatus,
}

pub struct UpdateReportStatusHandler {
    reports: Arc<dyn ReportRepository>,
    users: Arc<dyn UserRepository>,
}

impl UpdateReportStatusHandler {
    pub fn new(reports: Arc<dyn ReportRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { reports, users }
    }

    pub async fn handle(&self, cmd: UpdateReportStatusCommand) -> Result<Report, DomainError> {
        access::require_admin(self.users.as_ref(), &cmd.principal).await?;

        let report = self
            .reports
            .update_status(&cmd.report_id, cmd.status, Timestamp::now())
            .await?
            .ok_or_else(|| report_not_found(&cmd.report_id))?;

        info!(report_id = %report.id, status = %report.status, "report status updated");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{email, principal, Stores};
    use crate::domain::foundation::{ErrorCode, LessonId};

    async fn seeded_report(stores: &Stores) -> Report {
        let report = Report::submit(
            LessonId::new(),
            "T",
            email("b@y.com"),
            None,
            "spam",
            Timestamp::now(),
        )
        .unwrap();
        stores.reports.insert(&report).await.unwrap();
        report
    }

    fn handler(stores: &Stores) -> UpdateReportStatusHandler {
        UpdateReportStatusHandler::new(
            Arc::new(stores.reports.clone()),
            Arc::new(stores.users.clone()),
        )
    }

    #[tokio::test]
    async fn admin_resolves_and_reopens() {
        let stores = Stores::new();
        stores.seed_admin("root@x.com").await;
        let report = seeded_report(&stores).await;
        let handler = handler(&stores);

        let resolved = handler
            .handle(UpdateReportStatusCommand {
                principal: principal("root@x.com"),
                report_id: report.id,
                status: ReportStatus::Resolved,
            })
            .await
            .unwrap();
        assert_eq!(resolved.status, ReportStatus::Resolved);
        assert!(resolved.updated_at.is_some());

        let reopened = handler
            .handle(UpdateReportStatusCommand {
                principal: principal("root@x.com"),
                report_id: report.id,
                status: ReportStatus::Pending,
            })
            .await
            .unwrap();
        assert_eq!(reopened.status, ReportStatus::Pending);
    }

    #[tokio::test]
    async fn unknown_report_is_not_found() {
        let stores = Stores::new();
        stores.seed_admin("root@x.com").await;
        let err = handler(&stores)
            .handle(UpdateReportStatusCommand {
                principal: principal("root@x.com"),
                report_id: ReportId::new(),
                status: ReportStatus::Ignored,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ReportNotFound);
    }

    #[tokio::test]
    async fn non_admin_is_forbidden() {
        let stores = Stores::new();
        stores.sign_in("b@y.com").await;
        let report = seeded_report(&stores).await;
        let err = handler(&stores)
            .handle(UpdateReportStatusCommand {
                principal: principal("b@y.com"),
                report_id: report.id,
                status: ReportStatus::Ignored,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }
}
