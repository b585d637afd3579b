//! RemoveFavoriteHandler - unsave a lesson for the principal.
//!
//! The delete is authoritative: if nothing was deleted the call is
//! `FAVORITE_NOT_FOUND` and no counter moves. Otherwise both counters are
//! decremented, floored at zero.

use std::sync::Arc;

use tracing::info;

use crate::application::consistency::CounterAdjustments;
use crate::domain::favorite::favorite_not_found;
use crate::domain::foundation::{AuthenticatedUser, DerivedCounter, DomainError, LessonId};
use crate::ports::{FavoriteRepository, LessonRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct RemoveFavoriteCommand {
    pub principal: AuthenticatedUser,
    pub lesson_id: LessonId,
}

pub struct RemoveFavoriteHandler {
    favorites: Arc<dyn FavoriteRepository>,
    lessons: Arc<dyn LessonRepository>,
    users: Arc<dyn UserRepository>,
}

impl RemoveFavoriteHandler {
    pub fn new(
        favorites: Arc<dyn FavoriteRepository>,
        lessons: Arc<dyn LessonRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            favorites,
            lessons,
            users,
        }
    }

    pub async fn handle(&self, cmd: RemoveFavoriteCommand) -> Result<(), DomainError> {
        let user_email = &cmd.principal.email;

        if !self.favorites.delete(user_email, &cmd.lesson_id).await? {
            return Err(favorite_not_found(user_email, &cmd.lesson_id));
        }
        info!(lesson_id = %cmd.lesson_id, user = %user_email, "favorite removed");

        let mut counters = CounterAdjustments::new("remove favorite");
        counters
            .apply(
                DerivedCounter::FavoritesCount,
                cmd.lesson_id,
                -1,
                self.lessons.adjust_favorites_count(&cmd.lesson_id, -1),
            )
            .await;
        counters
            .apply(
                DerivedCounter::LessonsSaved,
                user_email,
                -1,
                self.users.adjust_lessons_saved(user_email, -1),
            )
            .await;
        counters.finish().map_err(|e| {
            e.with_detail("lessonId", cmd.lesson_id.to_string())
                .with_detail("userEmail", user_email.to_string())
        })
    }
}
