//! Mock identity verifier for tests and local runs.
//!
//! Maps opaque tokens to principals. Tokens not in the table fail with
//! `InvalidToken`.
//!
//! ```ignore
//! use lesson_hub::adapters::auth::MockIdentityVerifier;
//!
//! let verifier = MockIdentityVerifier::new().with_test_user("alice-token", "alice@x.com");
//! let principal = verifier.verify("alice-token").await?;
//! ```

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, Email};
use crate::ports::IdentityVerifier;

#[derive(Debug, Default)]
pub struct MockIdentityVerifier {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Returned for every verification when set.
    force_error: RwLock<Option<AuthError>>,
}

impl MockIdentityVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.add_token(token, user);
        self
    }

    /// Registers a verified user named after the local part of `email`.
    ///
    /// Panics on a malformed address; meant for fixtures only.
    pub fn with_test_user(self, token: impl Into<String>, email: &str) -> Self {
        let email = match Email::new(email) {
            Ok(email) => email,
            Err(e) => panic!("invalid fixture email {email}: {e}"),
        };
        let name = email.as_str().split('@').next().map(str::to_string);
        self.with_user(token, AuthenticatedUser::new(email, name, true))
    }

    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap_or_else(PoisonError::into_inner) = Some(error);
        self
    }

    pub fn clear_error(&self) {
        *self.force_error.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token.into(), user);
    }

    pub fn remove_token(&self, token: &str) {
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token);
    }
}

#[async_trait]
impl IdentityVerifier for MockIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self
            .force_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
