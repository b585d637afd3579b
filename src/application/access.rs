//! Role checks against the verified principal.

use crate::domain::foundation::{AuthenticatedUser, DomainError, Email};
use crate::domain::user::User;
use crate::ports::UserRepository;

/// Loads the principal's user record and requires the admin role.
///
/// A principal with no user record is treated as a plain user.
pub async fn require_admin(
    users: &dyn UserRepository,
    principal: &AuthenticatedUser,
) -> Result<User, DomainError> {
    match users.find_by_email(&principal.email).await? {
        Some(user) if user.is_admin() => Ok(user),
        _ => Err(DomainError::forbidden("Admin role required")
            .with_detail("requested_by", principal.email.to_string())),
    }
}

/// True if the principal has the admin role.
pub async fn is_admin(
    users: &dyn UserRepository,
    principal: &AuthenticatedUser,
) -> Result<bool, DomainError> {
    Ok(users
        .find_by_email(&principal.email)
        .await?
        .map_or(false, |user| user.is_admin()))
}

/// Allows the principal to act on its own account, or an admin on any.
pub async fn require_self_or_admin(
    users: &dyn UserRepository,
    principal: &AuthenticatedUser,
    target: &Email,
) -> Result<(), DomainError> {
    if &principal.email == target || is_admin(users, principal).await? {
        Ok(())
    } else {
        Err(DomainError::forbidden("Cannot act on another user's account")
            .with_detail("target", target.to_string())
            .with_detail("requested_by", principal.email.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserRepository;
    use crate::domain::foundation::{ErrorCode, Timestamp};
    use crate::domain::user::{Role, SignIn};

    fn principal(email: &str) -> AuthenticatedUser {
        AuthenticatedUser::new(Email::new(email).unwrap(), None, true)
    }

    async fn seed(users: &InMemoryUserRepository, email: &str, role: Role) {
        let sign_in = SignIn {
            email: Email::new(email).unwrap(),
            name: None,
            photo_url: None,
        };
        let mut user = User::register(sign_in, Timestamp::now());
        user.role = role;
        users.put(user).await;
    }

    #[tokio::test]
    async fn admin_passes_admin_check() {
        let users = InMemoryUserRepository::new();
        seed(&users, "root@x.com", Role::Admin).await;
        assert!(require_admin(&users, &principal("root@x.com")).await.is_ok());
    }

    #[tokio::test]
    async fn plain_or_unknown_user_is_forbidden() {
        let users = InMemoryUserRepository::new();
        seed(&users, "a@x.com", Role::User).await;

        let err = require_admin(&users, &principal("a@x.com")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
        assert!(require_admin(&users, &principal("nobody@x.com")).await.is_err());
    }

    #[tokio::test]
    async fn self_or_admin() {
        let users = InMemoryUserRepository::new();
        seed(&users, "root@x.com", Role::Admin).await;
        let target = Email::new("a@x.com").unwrap();

        assert!(require_self_or_admin(&users, &principal("a@x.com"), &target).await.is_ok());
        assert!(require_self_or_admin(&users, &principal("root@x.com"), &target).await.is_ok());
        assert!(require_self_or_admin(&users, &principal("b@y.com"), &target).await.is_err());
    }
}
