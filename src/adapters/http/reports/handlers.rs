//! HTTP handlers for report endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::{ApiJson, ApiQuery};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{SubmitReportCommand, UpdateReportStatusCommand};
use crate::domain::foundation::{LessonId, ReportId};

use super::dto::{
    ReportListQuery, SubmitReportRequest, SubmitReportResponse, UpdateReportStatusRequest,
};

/// POST /reports
pub async fn submit_report(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    ApiJson(body): ApiJson<SubmitReportRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = SubmitReportCommand {
        principal,
        lesson_id: LessonId::parse(&body.lesson_id)?,
        reason: body.reason,
    };
    let response = SubmitReportResponse::from(state.submit_report_handler().handle(cmd).await?);
    let status = if response.inserted {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(response)))
}

/// GET /reports
pub async fn list_reports(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    ApiQuery(query): ApiQuery<ReportListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let lesson_id = query
        .lesson_id
        .as_deref()
        .map(LessonId::parse)
        .transpose()?;
    let reports = state
        .list_reports_handler()
        .handle(&principal, lesson_id)
        .await?;
    Ok(Json(reports))
}

/// PATCH /reports/:id
pub async fn update_report_status(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateReportStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = UpdateReportStatusCommand {
        principal,
        report_id: ReportId::parse(&id)?,
        status: body.status,
    };
    let report = state.update_report_status_handler().handle(cmd).await?;
    Ok(Json(report))
}
