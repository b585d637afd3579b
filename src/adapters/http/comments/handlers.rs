//! HTTP handlers for comment endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::{ApiJson, ApiQuery};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{DeleteCommentCommand, PostCommentCommand};
use crate::domain::foundation::{CommentId, LessonId};

use super::dto::{CommentListQuery, PostCommentRequest};

/// POST /comments
pub async fn post_comment(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    ApiJson(body): ApiJson<PostCommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = PostCommentCommand {
        principal,
        lesson_id: LessonId::parse(&body.lesson_id)?,
        text: body.comment,
        user_name: body.user_name,
        user_photo: body.user_photo,
    };
    let comment = state.post_comment_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// GET /comments?lessonId=
pub async fn list_comments(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CommentListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let lesson_id = LessonId::parse(&query.lesson_id)?;
    let comments = state.list_comments_handler().handle(&lesson_id).await?;
    Ok(Json(comments))
}

/// DELETE /comments/:id
pub async fn delete_comment(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = DeleteCommentCommand {
        principal,
        comment_id: CommentId::parse(&id)?,
    };
    state.delete_comment_handler().handle(cmd).await?;
    Ok(StatusCode::NO_CONTENT)
}
