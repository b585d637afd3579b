//! Identity verification port.
//!
//! Given a bearer token, yield a verified principal or fail. Provider
//! agnostic: the production adapter verifies Firebase ID tokens, tests use
//! a token table.
//!
//! Implementations must validate the signature, issuer, audience and
//! expiry, and must fail with `AuthError::MissingEmail` when the token
//! carries no email, since email is the principal key.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verify a raw token (without the "Bearer " prefix).
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
