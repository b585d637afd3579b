//! HTTP adapter - the axum REST surface.
//!
//! One module per resource, each split into `dto`, `handlers` and `routes`.
//! Handlers translate requests into application commands and never decide
//! anything themselves; every identity decision uses the principal put in
//! place by `middleware::auth`.

pub mod comments;
pub mod error;
pub mod extract;
pub mod favorites;
pub mod lessons;
pub mod middleware;
pub mod payments;
pub mod reports;
pub mod router;
pub mod state;
pub mod users;

pub use error::{ApiError, ErrorResponse};
pub use extract::{ApiJson, ApiQuery, OptionalJson};
pub use router::{api_routes, build_router, RouterSettings};
pub use state::AppState;
