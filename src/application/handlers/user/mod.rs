//! User account handlers.

mod promote_to_admin;
mod set_premium;
mod upsert_user;
mod user_queries;

pub use promote_to_admin::{PromoteToAdminCommand, PromoteToAdminHandler};
pub(crate) use set_premium::apply_premium;
pub use set_premium::{SetPremiumCommand, SetPremiumHandler};
pub use upsert_user::{UpsertUserCommand, UpsertUserHandler};
pub use user_queries::{GetUserHandler, ListUsersHandler};
