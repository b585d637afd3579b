//! HTTP adapter for favorites.

mod dto;
mod handlers;
mod routes;

pub use dto::{AddFavoriteRequest, AddFavoriteResponse, FavoriteStatusResponse};
pub use routes::favorite_routes;
