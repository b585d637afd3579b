//! Application handlers.
//!
//! One command or query handler per operation. Handlers that touch more
//! than one collection own the ordering of those writes and the counter
//! bookkeeping around them.

pub mod comment;
pub mod favorite;
pub mod lesson;
pub mod payment;
pub mod report;
pub mod user;

#[cfg(test)]
mod test_support;

pub use comment::{
    DeleteCommentCommand, DeleteCommentHandler, ListCommentsHandler, PostCommentCommand,
    PostCommentHandler,
};
pub use favorite::{
    AddFavoriteCommand, AddFavoriteHandler, FavoriteQueries, RemoveFavoriteCommand,
    RemoveFavoriteHandler,
};
pub use lesson::{
    CreateLessonCommand, CreateLessonHandler, DeleteLessonCommand, DeleteLessonHandler,
    GetLessonHandler, ListLessonsHandler, ToggleLikeCommand, ToggleLikeHandler,
    UpdateLessonCommand, UpdateLessonHandler,
};
pub use payment::{
    CheckoutSettings, CreateCheckoutCommand, CreateCheckoutHandler, PaymentWebhookCommand,
    PaymentWebhookHandler, PaymentWebhookResult,
};
pub use report::{
    ListReportsHandler, SubmitReportCommand, SubmitReportHandler, UpdateReportStatusCommand,
    UpdateReportStatusHandler,
};
pub use user::{
    GetUserHandler, ListUsersHandler, PromoteToAdminCommand, PromoteToAdminHandler,
    SetPremiumCommand, SetPremiumHandler, UpsertUserCommand, UpsertUserHandler,
};
