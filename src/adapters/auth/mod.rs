//! Authentication adapters.
//!
//! Implementations of the `IdentityVerifier` port:
//!
//! - `firebase` - Firebase ID tokens verified against Google's JWKS
//! - `mock` - token table for tests that don't need an identity provider

mod firebase;
mod mock;

pub use firebase::{FirebaseConfig, FirebaseIdentityVerifier, GOOGLE_SECURETOKEN_JWKS_URL};
pub use mock::MockIdentityVerifier;
