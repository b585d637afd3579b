//! HTTP middleware for axum.
//!
//! - `auth` - bearer-token verification and principal extractors

pub mod auth;

pub use auth::{auth_middleware, AuthRejection, AuthState, OptionalAuth, RequireAuth};
