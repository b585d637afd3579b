//! Body and query extractors that reject with `ApiError`.
//!
//! axum's own `Json` and `Query` answer malformed input with a plain-text
//! 4xx; these wrappers keep every failure in the `{"code", "message",
//! "details"}` shape as `VALIDATION_FAILED`.

use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::adapters::http::error::ApiError;
use crate::domain::foundation::{DomainError, ErrorCode};

fn invalid_request(message: impl Into<String>) -> ApiError {
    ApiError(DomainError::new(ErrorCode::ValidationFailed, message))
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        invalid_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        invalid_request(rejection.body_text())
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        invalid_request(rejection.body_text())
    }
}

/// Required JSON body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// JSON body that may be left out.
///
/// Only an empty (or all-whitespace) body is `None`. Anything else must
/// parse as `T`; unlike `Option<Json<T>>`, a malformed body is an error
/// rather than silently treated as absent.
#[derive(Debug, Clone, Default)]
pub struct OptionalJson<T>(pub Option<T>);

#[async_trait]
impl<T, S> FromRequest<S> for OptionalJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(None));
        }
        serde_json::from_slice(&bytes)
            .map(|value| Self(Some(value)))
            .map_err(|e| invalid_request(format!("Invalid JSON body: {}", e)))
    }
}

/// Query string.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, StatusCode};
    use axum::response::IntoResponse;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct FavoriteBody {
        lesson_id: String,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn missing_field_is_validation_failed() {
        let err = ApiJson::<FavoriteBody>::from_request(json_request("{}"), &())
            .await
            .unwrap_err();
        assert_eq!(err.0.code, ErrorCode::ValidationFailed);
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn optional_body_empty_is_none() {
        for body in ["", "  \n"] {
            let OptionalJson(value) =
                OptionalJson::<FavoriteBody>::from_request(json_request(body), &())
                    .await
                    .unwrap();
            assert_eq!(value, None);
        }
    }

    #[tokio::test]
    async fn optional_body_must_parse_when_present() {
        let OptionalJson(value) =
            OptionalJson::<FavoriteBody>::from_request(json_request(r#"{"lessonId":"l1"}"#), &())
                .await
                .unwrap();
        assert_eq!(value, Some(FavoriteBody { lesson_id: "l1".to_string() }));

        let malformed = json_request(r#"{"lessonid":"l1"}"#);
        let err = OptionalJson::<FavoriteBody>::from_request(malformed, &())
            .await
            .unwrap_err();
        assert_eq!(err.0.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn bad_query_is_validation_failed() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Paging {
            limit: u32,
        }

        let (mut parts, _) = Request::builder()
            .uri("/?limit=many")
            .body(Body::empty())
            .unwrap()
            .into_parts();
        let err = ApiQuery::<Paging>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(err.0.code, ErrorCode::ValidationFailed);
    }
}
