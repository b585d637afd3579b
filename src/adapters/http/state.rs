//! Shared application state.
//!
//! Cloned per request; every dependency is an `Arc`'d port so the same
//! router runs over MongoDB in production and the in-memory stores in
//! tests. Handlers are built on demand from the ports they need.

use std::sync::Arc;

use crate::application::handlers::{
    AddFavoriteHandler, CheckoutSettings, CreateCheckoutHandler, CreateLessonHandler,
    DeleteCommentHandler, DeleteLessonHandler, FavoriteQueries, GetLessonHandler,
    GetUserHandler, ListCommentsHandler, ListLessonsHandler, ListReportsHandler,
    ListUsersHandler, PaymentWebhookHandler, PostCommentHandler, PromoteToAdminHandler,
    RemoveFavoriteHandler, SetPremiumHandler, SubmitReportHandler, ToggleLikeHandler,
    UpdateLessonHandler, UpdateReportStatusHandler, UpsertUserHandler,
};
use crate::ports::{
    CheckoutProvider, CommentRepository, FavoriteRepository, IdentityVerifier, LessonRepository,
    ReportRepository, UserRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub lessons: Arc<dyn LessonRepository>,
    pub users: Arc<dyn UserRepository>,
    pub favorites: Arc<dyn FavoriteRepository>,
    pub reports: Arc<dyn ReportRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub verifier: Arc<dyn IdentityVerifier>,
    pub checkout: Arc<dyn CheckoutProvider>,
    pub checkout_settings: CheckoutSettings,
}

impl AppState {
    // Lessons

    pub fn list_lessons_handler(&self) -> ListLessonsHandler {
        ListLessonsHandler::new(self.lessons.clone())
    }

    pub fn get_lesson_handler(&self) -> GetLessonHandler {
        GetLessonHandler::new(self.lessons.clone())
    }

    pub fn create_lesson_handler(&self) -> CreateLessonHandler {
        CreateLessonHandler::new(self.lessons.clone(), self.users.clone())
    }

    pub fn update_lesson_handler(&self) -> UpdateLessonHandler {
        UpdateLessonHandler::new(self.lessons.clone())
    }

    pub fn delete_lesson_handler(&self) -> DeleteLessonHandler {
        DeleteLessonHandler::new(self.lessons.clone(), self.users.clone())
    }

    pub fn toggle_like_handler(&self) -> ToggleLikeHandler {
        ToggleLikeHandler::new(self.lessons.clone())
    }

    // Users

    pub fn upsert_user_handler(&self) -> UpsertUserHandler {
        UpsertUserHandler::new(self.users.clone())
    }

    pub fn get_user_handler(&self) -> GetUserHandler {
        GetUserHandler::new(self.users.clone())
    }

    pub fn list_users_handler(&self) -> ListUsersHandler {
        ListUsersHandler::new(self.users.clone())
    }

    pub fn set_premium_handler(&self) -> SetPremiumHandler {
        SetPremiumHandler::new(self.users.clone())
    }

    pub fn promote_to_admin_handler(&self) -> PromoteToAdminHandler {
        PromoteToAdminHandler::new(self.users.clone())
    }

    // Favorites

    pub fn add_favorite_handler(&self) -> AddFavoriteHandler {
        AddFavoriteHandler::new(
            self.favorites.clone(),
            self.lessons.clone(),
            self.users.clone(),
        )
    }

    pub fn remove_favorite_handler(&self) -> RemoveFavoriteHandler {
        RemoveFavoriteHandler::new(
            self.favorites.clone(),
            self.lessons.clone(),
            self.users.clone(),
        )
    }

    pub fn favorite_queries(&self) -> FavoriteQueries {
        FavoriteQueries::new(self.favorites.clone())
    }

    // Reports

    pub fn submit_report_handler(&self) -> SubmitReportHandler {
        SubmitReportHandler::new(self.reports.clone(), self.lessons.clone())
    }

    pub fn update_report_status_handler(&self) -> UpdateReportStatusHandler {
        UpdateReportStatusHandler::new(self.reports.clone(), self.users.clone())
    }

    pub fn list_reports_handler(&self) -> ListReportsHandler {
        ListReportsHandler::new(self.reports.clone(), self.users.clone())
    }

    // Comments

    pub fn post_comment_handler(&self) -> PostCommentHandler {
        PostCommentHandler::new(self.comments.clone())
    }

    pub fn delete_comment_handler(&self) -> DeleteCommentHandler {
        DeleteCommentHandler::new(self.comments.clone())
    }

    pub fn list_comments_handler(&self) -> ListCommentsHandler {
        ListCommentsHandler::new(self.comments.clone())
    }

    // Payments

    pub fn create_checkout_handler(&self) -> CreateCheckoutHandler {
        CreateCheckoutHandler::new(self.checkout.clone(), self.checkout_settings.clone())
    }

    pub fn payment_webhook_handler(&self) -> PaymentWebhookHandler {
        PaymentWebhookHandler::new(
            self.checkout.clone(),
            self.users.clone(),
            self.checkout_settings.premium_price_cents,
        )
    }
}
