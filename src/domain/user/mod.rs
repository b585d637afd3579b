//! User accounts, roles and per-user derived counters.

mod account;
mod role;

pub use account::{user_not_found, SignIn, UpsertOutcome, User};
pub use role::Role;
