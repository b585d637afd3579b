//! Report handlers.

mod report_queries;
mod submit_report;
mod update_report_status;

pub use report_queries::ListReportsHandler;
pub use submit_report::{SubmitReportCommand, SubmitReportHandler};
pub use update_report_status::{UpdateReportStatusCommand, UpdateReportStatusHandler};
