//! HTTP adapter for lesson comments.

mod dto;
mod handlers;
mod routes;

pub use dto::{CommentListQuery, PostCommentRequest};
pub use routes::comment_routes;
