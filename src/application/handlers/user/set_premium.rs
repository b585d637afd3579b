//! SetPremiumHandler - grant or cancel premium on an account.
//!
//! Both directions validate that the account exists.

use std::sync::Arc;

use tracing::info;

use crate::application::access;
use crate::domain::foundation::{AuthenticatedUser, DomainError, Email, Timestamp};
use crate::domain::user::{user_not_found, User};
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct SetPremiumCommand {
    pub principal: AuthenticatedUser,
    pub target: Email,
    pub value: bool,
}

pub struct SetPremiumHandler {
    users: Arc<dyn UserRepository>,
}

impl SetPremiumHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: SetPremiumCommand) -> Result<User, DomainError> {
        access::require_self_or_admin(self.users.as_ref(), &cmd.principal, &cmd.target).await?;
        apply_premium(self.users.as_ref(), &cmd.target, cmd.value).await
    }
}

/// Sets `isPremium` and returns the stored user.
pub(crate) async fn apply_premium(
    users: &dyn UserRepository,
    target: &Email,
    value: bool,
) -> Result<User, DomainError> {
    if !users.set_premium(target, value, Timestamp::now()).await? {
        return Err(user_not_found(target));
    }
    info!(email = %target, premium = value, "premium status changed");
    users
        .find_by_email(target)
        .await?
        .ok_or_else(|| user_not_found(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{email, principal, Stores};
    use crate::domain::foundation::ErrorCode;

    fn cmd(by: &str, target: &str, value: bool) -> SetPremiumCommand {
        SetPremiumCommand {
            principal: principal(by),
            target: email(target),
            value,
        }
    }

    #[tokio::test]
    async fn grant_then_cancel_for_self() {
        let stores = Stores::new();
        stores.sign_in("a@x.com").await;
        let handler = SetPremiumHandler::new(Arc::new(stores.users.clone()));

        let granted = handler.handle(cmd("a@x.com", "a@x.com", true)).await.unwrap();
        assert!(granted.is_premium);

        let cancelled = handler.handle(cmd("a@x.com", "a@x.com", false)).await.unwrap();
        assert!(!cancelled.is_premium);
    }

    #[tokio::test]
    async fn grant_and_cancel_both_validate_existence() {
        let stores = Stores::new();
        stores.seed_admin("root@x.com").await;
        let handler = SetPremiumHandler::new(Arc::new(stores.users.clone()));

        let grant = handler.handle(cmd("root@x.com", "ghost@x.com", true)).await.unwrap_err();
        let cancel = handler.handle(cmd("root@x.com", "ghost@x.com", false)).await.unwrap_err();
        assert_eq!(grant.code, ErrorCode::UserNotFound);
        assert_eq!(cancel.code, ErrorCode::UserNotFound);
    }

    #[tokio::test]
    async fn other_users_cannot_change_premium() {
        let stores = Stores::new();
        stores.sign_in("a@x.com").await;
        let handler = SetPremiumHandler::new(Arc::new(stores.users.clone()));

        let err = handler.handle(cmd("b@y.com", "a@x.com", true)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
        assert!(!stores.user("a@x.com").await.is_premium);
    }
}
