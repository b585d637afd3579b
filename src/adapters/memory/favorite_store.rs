use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::newest_first;
use crate::domain::favorite::Favorite;
use crate::domain::foundation::{DomainError, Email, LessonId};
use crate::ports::{FavoriteRepository, InsertOutcome};

#[derive(Debug, Clone, Default)]
pub struct InMemoryFavoriteRepository {
    favorites: Arc<RwLock<Vec<Favorite>>>,
}

impl InMemoryFavoriteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.favorites.write().await.clear();
    }

    pub async fn count_for_lesson(&self, lesson_id: &LessonId) -> usize {
        self.favorites
            .read()
            .await
            .iter()
            .filter(|f| &f.lesson_id == lesson_id)
            .count()
    }

    pub async fn count_for_user(&self, user_email: &Email) -> usize {
        self.favorites
            .read()
            .await
            .iter()
            .filter(|f| &f.user_email == user_email)
            .count()
    }
}

#[async_trait]
impl FavoriteRepository for InMemoryFavoriteRepository {
    async fn insert(&self, favorite: &Favorite) -> Result<InsertOutcome, DomainError> {
        let mut favorites = self.favorites.write().await;
        let exists = favorites
            .iter()
            .any(|f| f.user_email == favorite.user_email && f.lesson_id == favorite.lesson_id);
        if exists {
            return Ok(InsertOutcome::Duplicate);
        }
        favorites.push(favorite.clone());
        Ok(InsertOutcome::Inserted)
    }

    async fn find(
        &self,
        user_email: &Email,
        lesson_id: &LessonId,
    ) -> Result<Option<Favorite>, DomainError> {
        Ok(self
            .favorites
            .read()
            .await
            .iter()
            .find(|f| &f.user_email == user_email && &f.lesson_id == lesson_id)
            .cloned())
    }

    async fn delete(&self, user_email: &Email, lesson_id: &LessonId) -> Result<bool, DomainError> {
        let mut favorites = self.favorites.write().await;
        let before = favorites.len();
        favorites.retain(|f| !(&f.user_email == user_email && &f.lesson_id == lesson_id));
        Ok(favorites.len() < before)
    }

    async fn list_by_user(&self, user_email: &Email) -> Result<Vec<Favorite>, DomainError> {
        let favorites = self.favorites.read().await;
        let mine: Vec<Favorite> = favorites
            .iter()
            .filter(|f| &f.user_email == user_email)
            .cloned()
            .collect();
        Ok(newest_first(&mine, |f| f.created_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{AuthenticatedUser, Timestamp};
    use crate::domain::lesson::{Lesson, LessonDraft};

    fn lesson(title: &str) -> Lesson {
        let author = AuthenticatedUser::new(Email::new("a@x.com").unwrap(), None, true);
        let draft = LessonDraft {
            title: title.to_string(),
            ..Default::default()
        };
        Lesson::create(draft, &author, Timestamp::now()).unwrap()
    }

    #[tokio::test]
    async fn second_insert_of_same_pair_is_duplicate() {
        let repo = InMemoryFavoriteRepository::new();
        let lesson = lesson("L");
        let who = Email::new("b@y.com").unwrap();

        let first = Favorite::new(who.clone(), &lesson, Timestamp::now());
        let second = Favorite::new(who.clone(), &lesson, Timestamp::now());
        assert_eq!(repo.insert(&first).await.unwrap(), InsertOutcome::Inserted);
        assert_eq!(repo.insert(&second).await.unwrap(), InsertOutcome::Duplicate);
        assert_eq!(repo.count_for_lesson(&lesson.id).await, 1);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let repo = InMemoryFavoriteRepository::new();
        let who = Email::new("b@y.com").unwrap();
        let base = Timestamp::now();
        let older = lesson("older");
        let newer = lesson("newer");

        repo.insert(&Favorite::new(who.clone(), &newer, base.plus_millis(10)))
            .await
            .unwrap();
        repo.insert(&Favorite::new(who.clone(), &older, base)).await.unwrap();

        let listed = repo.list_by_user(&who).await.unwrap();
        assert_eq!(listed[0].lesson.title, "newer");
        assert_eq!(listed[1].lesson.title, "older");
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed() {
        let repo = InMemoryFavoriteRepository::new();
        let lesson = lesson("L");
        let who = Email::new("b@y.com").unwrap();
        repo.insert(&Favorite::new(who.clone(), &lesson, Timestamp::now()))
            .await
            .unwrap();

        assert!(repo.delete(&who, &lesson.id).await.unwrap());
        assert!(!repo.delete(&who, &lesson.id).await.unwrap());
    }
}
