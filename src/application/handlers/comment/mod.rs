//! Comment handlers.

mod comment_queries;
mod delete_comment;
mod post_comment;

pub use comment_queries::ListCommentsHandler;
pub use delete_comment::{DeleteCommentCommand, DeleteCommentHandler};
pub use post_comment::{PostCommentCommand, PostCommentHandler};
