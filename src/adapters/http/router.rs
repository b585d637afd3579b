//! Top-level router: every resource's routes plus the cross-cutting layers.

use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::comments::comment_routes;
use super::favorites::favorite_routes;
use super::lessons::lesson_routes;
use super::middleware::{auth_middleware, AuthState};
use super::payments::payment_routes;
use super::reports::report_routes;
use super::state::AppState;
use super::users::user_routes;

#[derive(Debug, Clone)]
pub struct RouterSettings {
    /// Allowed browser origins; `*` allows any.
    pub cors_origins: Vec<String>,
    pub request_timeout: Duration,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            cors_origins: vec![
                "http://localhost:5173".to_string(),
                "http://localhost:5174".to_string(),
            ],
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// GET /
async fn health() -> &'static str {
    "server is running!"
}

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health))
        .merge(lesson_routes())
        .merge(user_routes())
        .merge(favorite_routes())
        .merge(report_routes())
        .merge(comment_routes())
        .merge(payment_routes())
}

pub fn build_router(state: AppState, settings: &RouterSettings) -> Router {
    let auth_state: AuthState = state.verifier.clone();

    api_routes()
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware))
        .with_state(state)
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(cors_layer(&settings.cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origins.iter().any(|o| o == "*") {
        return base.allow_origin(AllowOrigin::any());
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(allowed))
        .allow_credentials(true)
}
