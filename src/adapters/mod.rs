//! Adapters - Implementations of port interfaces.
//!
//! - `mongo` - MongoDB repositories (production store)
//! - `memory` - in-process repositories with the same semantics
//! - `auth` - Firebase ID-token verification
//! - `stripe` - hosted checkout and webhook verification
//! - `http` - axum router, handlers and middleware

pub mod auth;
pub mod http;
pub mod memory;
pub mod mongo;
pub mod stripe;
