//! AddFavoriteHandler - save a lesson for the principal.
//!
//! Steps, in order:
//! 1. the lesson must exist (its fields are snapshotted onto the favorite)
//! 2. an existing favorite short-circuits as `AlreadyFavorited`
//! 3. insert the favorite; a uniqueness violation from a concurrent add
//!    is the same `AlreadyFavorited` answer
//! 4. `favoritesCount` on the lesson +1
//! 5. `totalLessonsSaved` on the user +1
//!
//! Step 3 is authoritative. Steps 4 and 5 only run after a successful
//! insert, so counters move exactly once per favorite.

use std::sync::Arc;

use tracing::info;

use crate::application::consistency::CounterAdjustments;
use crate::domain::favorite::{AddFavoriteOutcome, Favorite};
use crate::domain::foundation::{
    AuthenticatedUser, DerivedCounter, DomainError, LessonId, Timestamp,
};
use crate::domain::lesson::lesson_not_found;
use crate::ports::{FavoriteRepository, InsertOutcome, LessonRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct AddFavoriteCommand {
    pub principal: AuthenticatedUser,
    pub lesson_id: LessonId,
}

pub struct AddFavoriteHandler {
    favorites: Arc<dyn FavoriteRepository>,
    lessons: Arc<dyn LessonRepository>,
    users: Arc<dyn UserRepository>,
}

impl AddFavoriteHandler {
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

    pub async fn handle(&self, cmd: AddFavoriteCommand) -> Result<AddFavoriteOutcome, DomainError> {
        let user_email = cmd.principal.email;

        let lesson = self
            .lessons
            .find_by_id(&cmd.lesson_id)
            .await?
            .ok_or_else(|| lesson_not_found(&cmd.lesson_id))?;

        if self.favorites.find(&user_email, &lesson.id).await?.is_some() {
            return Ok(AddFavoriteOutcome::AlreadyFavorited);
        }

        let favorite = Favorite::new(user_email, &lesson, Timestamp::now());
        if self.favorites.insert(&favorite).await? == InsertOutcome::Duplicate {
            return Ok(AddFavoriteOutcome::AlreadyFavorited);
        }
        info!(lesson_id = %lesson.id, user = %favorite.user_email, "lesson favorited");

        let mut counters = CounterAdjustments::new("add favorite");
        counters
            .apply(
                DerivedCounter::FavoritesCount,
                lesson.id,
                1,
                self.lessons.adjust_favorites_count(&lesson.id, 1),
            )
            .await;
        counters
            .apply(
                DerivedCounter::LessonsSaved,
                &favorite.user_email,
                1,
                self.users.adjust_lessons_saved(&favorite.user_email, 1),
            )
            .await;
        counters.finish().map_err(|e| {
            e.with_detail("lessonId", lesson.id.to_string())
                .with_detail("userEmail", favorite.user_email.to_string())
        })?;

        Ok(AddFavoriteOutcome::Added(favorite))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{principal, FlakyLessons, Stores};
    use crate::domain::foundation::ErrorCode;

    fn handler(stores: &Stores) -> AddFavoriteHandler {
        AddFavoriteHandler::new(
            Arc::new(stores.favorites.clone()),
            Arc::new(stores.lessons.clone()),
            Arc::new(stores.users.clone()),
        )
    }

    fn cmd(who: &str, lesson_id: LessonId) -> AddFavoriteCommand {
        AddFavoriteCommand {
            principal: principal(who),
            lesson_id,
        }
    }

    #[tokio::test]
    async fn add_increments_both_counters_once() {
        let stores = Stores::new();
        stores.sign_in("b@y.com").await;
        let lesson = stores.seed_lesson("a@x.com", "L").await;

        let outcome = handler(&stores).handle(cmd("b@y.com", lesson.id)).await.unwrap();

        assert!(outcome.was_added());
        assert_eq!(stores.lesson(&lesson.id).await.favorites_count, 1);
        assert_eq!(stores.user("b@y.com").await.total_lessons_saved, 1);
    }

    #[tokio::test]
    async fn adding_twice_is_idempotent() {
        let stores = Stores::new();
        stores.sign_in("b@y.com").await;
        let lesson = stores.seed_lesson("a@x.com", "L").await;
        let handler = handler(&stores);

        handler.handle(cmd("b@y.com", lesson.id)).await.unwrap();
        let second = handler.handle(cmd("b@y.com", lesson.id)).await.unwrap();

        assert_eq!(second, AddFavoriteOutcome::AlreadyFavorited);
        assert_eq!(stores.favorites.count_for_lesson(&lesson.id).await, 1);
        assert_eq!(stores.lesson(&lesson.id).await.favorites_count, 1);
        assert_eq!(stores.user("b@y.com").await.total_lessons_saved, 1);
    }

    #[tokio::test]
    async fn concurrent_adds_produce_one_favorite() {
        let stores = Stores::new();
        stores.sign_in("b@y.com").await;
        let lesson = stores.seed_lesson("a@x.com", "L").await;
        let handler = Arc::new(handler(&stores));

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let handler = handler.clone();
            let id = lesson.id;
            tasks.push(tokio::spawn(async move {
                handler.handle(cmd("b@y.com", id)).await.unwrap()
            }));
        }
        let mut added = 0;
        for task in tasks {
            if task.await.unwrap().was_added() {
                added += 1;
            }
        }

        assert_eq!(added, 1);
        assert_eq!(stores.favorites.count_for_lesson(&lesson.id).await, 1);
        assert_eq!(stores.lesson(&lesson.id).await.favorites_count, 1);
        assert_eq!(stores.user("b@y.com").await.total_lessons_saved, 1);
    }

    #[tokio::test]
    async fn unknown_lesson_is_not_found_and_nothing_is_written() {
        let stores = Stores::new();
        stores.sign_in("b@y.com").await;

        let err = handler(&stores)
            .handle(cmd("b@y.com", LessonId::new()))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::LessonNotFound);
        assert_eq!(stores.user("b@y.com").await.total_lessons_saved, 0);
    }

    #[tokio::test]
    async fn failed_lesson_counter_still_updates_user_counter() {
        let stores = Stores::new();
        stores.sign_in("b@y.com").await;
        let lesson = stores.seed_lesson("a@x.com", "L").await;
        let handler = AddFavoriteHandler::new(
            Arc::new(stores.favorites.clone()),
            FlakyLessons::failing(stores.lessons.clone()),
            Arc::new(stores.users.clone()),
        );

        let err = handler.handle(cmd("b@y.com", lesson.id)).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::PartialWrite);
        assert!(err.details.contains_key("favoritesCount"));
        assert_eq!(stores.favorites.count_for_lesson(&lesson.id).await, 1);
        assert_eq!(stores.lesson(&lesson.id).await.favorites_count, 0);
        assert_eq!(stores.user("b@y.com").await.total_lessons_saved, 1);
    }
}
