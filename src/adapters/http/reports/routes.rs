//! Report routes.

use axum::{
    routing::{get, patch},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{list_reports, submit_report, update_report_status};

/// # Routes
///
/// - `POST /reports` - report a lesson; one report per user and lesson
/// - `GET /reports` - all reports, or `?lessonId=` (admin)
/// - `PATCH /reports/:id` - set `{status}` (admin)
pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/reports", get(list_reports).post(submit_report))
        .route("/reports/:id", patch(update_report_status))
}
