//! Request and response bodies for report endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::report::{Report, ReportStatus, SubmitReportOutcome};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReportRequest {
    pub lesson_id: String,
    pub reason: String,
}

/// A repeat report from the same user answers `inserted: false`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReportResponse {
    pub inserted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<Report>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<SubmitReportOutcome> for SubmitReportResponse {
    fn from(outcome: SubmitReportOutcome) -> Self {
        match outcome {
            SubmitReportOutcome::Submitted(report) => Self {
                inserted: true,
                report: Some(report),
                message: None,
            },
            SubmitReportOutcome::Duplicate => Self {
                inserted: false,
                report: None,
                message: Some("You have already reported this lesson".to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateReportStatusRequest {
    pub status: ReportStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportListQuery {
    pub lesson_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_body_rejects_unknown_status() {
        assert!(serde_json::from_str::<UpdateReportStatusRequest>(r#"{"status":"resolved"}"#).is_ok());
        assert!(serde_json::from_str::<UpdateReportStatusRequest>(r#"{"status":"deleted"}"#).is_err());
    }

    #[test]
    fn duplicate_report_message() {
        let response = SubmitReportResponse::from(SubmitReportOutcome::Duplicate);
        assert!(!response.inserted);
        assert!(response.message.is_some());
    }
}
