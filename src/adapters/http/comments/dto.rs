//! Request bodies for comment endpoints.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCommentRequest {
    pub lesson_id: String,
    pub comment: String,
    /// Display overrides; default to the token's name and picture.
    pub user_name: Option<String>,
    pub user_photo: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentListQuery {
    pub lesson_id: String,
}
