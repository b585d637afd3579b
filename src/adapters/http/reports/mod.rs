//! HTTP adapter for abuse reports.

mod dto;
mod handlers;
mod routes;

pub use dto::{ReportListQuery, SubmitReportRequest, SubmitReportResponse, UpdateReportStatusRequest};
pub use routes::report_routes;
