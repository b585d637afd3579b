//! HTTP handlers for lesson endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::{ApiJson, ApiQuery, OptionalJson};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{
    CreateLessonCommand, DeleteLessonCommand, ToggleLikeCommand, UpdateLessonCommand,
};
use crate::domain::foundation::LessonId;
use crate::domain::lesson::{LessonDraft, LessonPatch};
use crate::ports::LessonFilter;

use super::dto::{DeletedLessonResponse, LessonListQuery, ToggleLikeRequest};

/// GET /lessons
pub async fn list_lessons(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<LessonListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let lessons = state.list_lessons_handler().handle(query.into()).await?;
    Ok(Json(lessons))
}

/// GET /lessons/:id
pub async fn get_lesson(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let lesson_id = LessonId::parse(&id)?;
    let lesson = state.get_lesson_handler().handle(lesson_id).await?;
    Ok(Json(lesson))
}

/// POST /lessons
pub async fn create_lesson(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    ApiJson(draft): ApiJson<LessonDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let lesson = state
        .create_lesson_handler()
        .handle(CreateLessonCommand { principal, draft })
        .await?;
    Ok((StatusCode::CREATED, Json(lesson)))
}

/// PATCH /lessons/:id
pub async fn update_lesson(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<LessonPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = UpdateLessonCommand {
        principal,
        lesson_id: LessonId::parse(&id)?,
        patch,
    };
    let lesson = state.update_lesson_handler().handle(cmd).await?;
    Ok(Json(lesson))
}

/// GET /my-lessons
pub async fn my_lessons(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let lessons = state
        .list_lessons_handler()
        .handle(LessonFilter::by_creator(principal.email))
        .await?;
    Ok(Json(lessons))
}

/// DELETE /my-lessons/:id
pub async fn delete_lesson(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = DeleteLessonCommand {
        principal,
        lesson_id: LessonId::parse(&id)?,
    };
    let deleted = state.delete_lesson_handler().handle(cmd).await?;
    Ok(Json(DeletedLessonResponse {
        deleted: true,
        id: deleted.id,
    }))
}

/// PATCH /lessons/:id/like
pub async fn toggle_like(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    Path(id): Path<String>,
    OptionalJson(body): OptionalJson<ToggleLikeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = ToggleLikeCommand {
        principal,
        lesson_id: LessonId::parse(&id)?,
        claimed_email: body.and_then(|b| b.user_email),
    };
    let toggle = state.toggle_like_handler().handle(cmd).await?;
    Ok(Json(toggle))
}
