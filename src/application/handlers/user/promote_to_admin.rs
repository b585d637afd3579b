//! PromoteToAdminHandler - admins may promote other accounts.
//!
//! There is no demotion. The first admin is seeded directly in storage.

use std::sync::Arc;

use tracing::info;

use crate::application::access;
use crate::domain::foundation::{AuthenticatedUser, DomainError, Email, Timestamp};
use crate::domain::user::{user_not_found, Role, User};
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct PromoteToAdminCommand {
    pub principal: AuthenticatedUser,
    pub target: Email,
}

pub struct PromoteToAdminHandler {
    users: Arc<dyn UserRepository>,
}

impl PromoteToAdminHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: PromoteToAdminCommand) -> Result<User, DomainError> {
        access::require_admin(self.users.as_ref(), &cmd.principal).await?;

        if !self
            .users
            .set_role(&cmd.target, Role::Admin, Timestamp::now())
            .await?
        {
            return Err(user_not_found(&cmd.target));
        }
        info!(target_user = %cmd.target, promoted_by = %cmd.principal.email, "user promoted to admin");

        self.users
            .find_by_email(&cmd.target)
            .await?
            .ok_or_else(|| user_not_found(&cmd.target))
    }
}
