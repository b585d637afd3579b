//! HTTP adapter for user accounts: sign-in upsert, reads, premium and role.

mod dto;
mod handlers;
mod routes;

pub use dto::{SignInRequest, SignInResponse};
pub use routes::user_routes;
