//! Authentication middleware and extractors for axum.
//!
//! - `auth_middleware` verifies a Bearer token and injects the principal
//!   into request extensions
//! - `RequireAuth` rejects the request with 401 when no principal is present
//! - `OptionalAuth` yields `None` for anonymous requests
//!
//! The middleware only knows the `IdentityVerifier` port, so the Firebase
//! verifier and the mock are interchangeable.
//!
//! ```text
//! Request → auth_middleware → AuthenticatedUser in extensions
//!                                      ↓
//!                              Handler → RequireAuth reads it back
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::IdentityVerifier;

pub type AuthState = Arc<dyn IdentityVerifier>;

/// Verifies `Authorization: Bearer <token>` when present.
///
/// A missing header passes through untouched; protected handlers reject it
/// through `RequireAuth`. A header that fails verification is answered
/// here, before any handler or repository runs.
pub async fn auth_middleware(
    State(verifier): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim);

    let Some(token) = token else {
        return next.run(request).await;
    };

    match verifier.verify(token).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => auth_error_response(&e),
    }
}

fn auth_error_response(error: &AuthError) -> Response {
    let (status, message) = match error {
        AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired"),
        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
        AuthError::MissingEmail => (StatusCode::UNAUTHORIZED, "Token has no email"),
        AuthError::ServiceUnavailable(msg) => {
            tracing::error!(error = %msg, "identity verifier unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "Authentication service unavailable",
            )
        }
    };
    let code = if status == StatusCode::UNAUTHORIZED {
        "UNAUTHORIZED"
    } else {
        "AUTH_UNAVAILABLE"
    };
    (status, Json(ErrorResponse::new(code, message))).into_response()
}

/// Extractor for handlers that need a verified principal.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or(AuthRejection::Unauthenticated)
    }
}

/// Extractor for routes that behave the same with or without a principal.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(parts.extensions.get::<AuthenticatedUser>().cloned()))
    }
}

#[derive(Debug, Clone)]
pub enum AuthRejection {
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("UNAUTHORIZED", "Authentication required")),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockIdentityVerifier;
    use crate::domain::foundation::Email;
    use axum::{body::Body, middleware, routing::get, Router};
    use tower::ServiceExt;

    fn test_user() -> AuthenticatedUser {
        AuthenticatedUser::new(
            Email::new("test@example.com").unwrap(),
            Some("Test User".to_string()),
            true,
        )
    }

    fn app(verifier: MockIdentityVerifier) -> Router {
        let state: AuthState = Arc::new(verifier);
        Router::new()
            .route(
                "/private",
                get(|RequireAuth(user): RequireAuth| async move { user.email.to_string() }),
            )
            .route(
                "/public",
                get(|OptionalAuth(user): OptionalAuth| async move {
                    user.map_or("guest".to_string(), |u| u.email.to_string())
                }),
            )
            .layer(middleware::from_fn_with_state(state, auth_middleware))
    }

    fn get_with(uri: &str, token: Option<&str>) -> axum::http::Request<Body> {
        let mut builder = axum::http::Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn valid_token_reaches_protected_handler() {
        let verifier = MockIdentityVerifier::new().with_user("good", test_user());
        let response = app(verifier)
            .oneshot(get_with("/private", Some("good")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "test@example.com");
    }

    #[tokio::test]
    async fn missing_token_is_rejected_by_extractor() {
        let response = app(MockIdentityVerifier::new())
            .oneshot(get_with("/private", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn invalid_token_is_rejected_even_on_public_routes() {
        let response = app(MockIdentityVerifier::new())
            .oneshot(get_with("/public", Some("forged")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(body_text(response).await.contains("UNAUTHORIZED"));
    }

    #[tokio::test]
    async fn anonymous_public_request_passes() {
        let response = app(MockIdentityVerifier::new())
            .oneshot(get_with("/public", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "guest");
    }

    #[tokio::test]
    async fn verifier_outage_is_503() {
        let verifier =
            MockIdentityVerifier::new().with_error(AuthError::service_unavailable("jwks down"));
        let response = app(verifier)
            .oneshot(get_with("/private", Some("anything")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn non_bearer_scheme_is_ignored() {
        assert_eq!("Basic dXNlcjpwYXNz".strip_prefix("Bearer "), None);
    }

    #[test]
    fn extractors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuthState>();
        assert_send_sync::<RequireAuth>();
        assert_send_sync::<OptionalAuth>();
    }
}
