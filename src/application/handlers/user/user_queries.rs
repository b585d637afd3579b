//! User read paths.

use std::sync::Arc;

use crate::application::access;
use crate::domain::foundation::{AuthenticatedUser, DomainError, Email};
use crate::domain::user::{user_not_found, User};
use crate::ports::UserRepository;

/// Reads one account; self or admin only.
pub struct GetUserHandler {
    users: Arc<dyn UserRepository>,
}

impl GetUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(
        &self,
        principal: &AuthenticatedUser,
        email: &Email,
    ) -> Result<User, DomainError> {
        access::require_self_or_admin(self.users.as_ref(), principal, email).await?;
        self.users
            .find_by_email(email)
            .await?
            .ok_or_else(|| user_not_found(email))
    }
}

/// Lists all accounts; admin only.
pub struct ListUsersHandler {
    users: Arc<dyn UserRepository>,
}

impl ListUsersHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, principal: &AuthenticatedUser) -> Result<Vec<User>, DomainError> {
        access::require_admin(self.users.as_ref(), principal).await?;
        self.users.list().await
    }
}
