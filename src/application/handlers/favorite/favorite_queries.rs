//! Favorite read paths.

use std::sync::Arc;

use crate::domain::favorite::Favorite;
use crate::domain::foundation::{DomainError, Email, LessonId};
use crate::ports::FavoriteRepository;

pub struct FavoriteQueries {
    favorites: Arc<dyn FavoriteRepository>,
}

impl FavoriteQueries {
    pub fn new(favorites: Arc<dyn FavoriteRepository>) -> Self {
        Self { favorites }
    }

    pub async fn is_favorited(
        &self,
        user_email: &Email,
        lesson_id: &LessonId,
    ) -> Result<bool, DomainError> {
        Ok(self.favorites.find(user_email, lesson_id).await?.is_some())
    }

    /// Most recently saved first.
    pub async fn list(&self, user_email: &Email) -> Result<Vec<Favorite>, DomainError> {
        self.favorites.list_by_user(user_email).await
    }
}
