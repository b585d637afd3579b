//! UpsertUserHandler - create-or-touch the principal's account at sign-in.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{AuthenticatedUser, DomainError, Timestamp};
use crate::domain::user::{SignIn, UpsertOutcome};
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct UpsertUserCommand {
    pub principal: AuthenticatedUser,
    /// Overrides the token's display name on first sign-in.
    pub name: Option<String>,
    pub photo_url: Option<String>,
}

pub struct UpsertUserHandler {
    users: Arc<dyn UserRepository>,
}

impl UpsertUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Idempotent: repeat calls only move `updatedAt`.
    pub async fn handle(&self, cmd: UpsertUserCommand) -> Result<UpsertOutcome, DomainError> {
        let sign_in = SignIn {
            email: cmd.principal.email.clone(),
            name: cmd.name.or(cmd.principal.display_name),
            photo_url: cmd.photo_url.or(cmd.principal.picture),
        };
        let outcome = self.users.upsert_on_login(&sign_in, Timestamp::now()).await?;
        if outcome.created {
            info!(email = %outcome.user.email, "user registered");
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{principal, Stores};

    #[tokio::test]
    async fn repeated_sign_in_creates_one_user() {
        let stores = Stores::new();
        let handler = UpsertUserHandler::new(Arc::new(stores.users.clone()));
        let cmd = UpsertUserCommand {
            principal: principal("a@x.com"),
            name: Some("Alice".to_string()),
            photo_url: None,
        };

        let first = handler.handle(cmd.clone()).await.unwrap();
        let second = handler.handle(cmd).await.unwrap();

        assert!(first.created);
        assert!(!second.created);
        assert_eq!(first.user.id, second.user.id);
        assert_eq!(second.user.name.as_deref(), Some("Alice"));
        assert_eq!(stores.users.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn falls_back_to_token_profile() {
        let stores = Stores::new();
        let handler = UpsertUserHandler::new(Arc::new(stores.users.clone()));
        let mut who = principal("b@y.com").with_picture("https://img.example/b.png");
        who.display_name = Some("Bob".to_string());

        let outcome = handler
            .handle(UpsertUserCommand {
                principal: who,
                name: None,
                photo_url: None,
            })
            .await
            .unwrap();

        assert_eq!(outcome.user.name.as_deref(), Some("Bob"));
        assert_eq!(outcome.user.photo_url.as_deref(), Some("https://img.example/b.png"));
    }
}
