//! Favorite handlers: the counter-maintaining add/remove pair and reads.

mod add_favorite;
mod favorite_queries;
mod remove_favorite;

pub use add_favorite::{AddFavoriteCommand, AddFavoriteHandler};
pub use favorite_queries::FavoriteQueries;
pub use remove_favorite::{RemoveFavoriteCommand, RemoveFavoriteHandler};
