//! Domain error to HTTP response mapping.
//!
//! Every handler returns `Result<_, ApiError>`; the body is always
//! `{"code", "message", "details"}`.

use std::collections::HashMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub details: HashMap<String, String>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: HashMap::new(),
        }
    }
}

/// Wraps a `DomainError` so handlers can use `?`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        c if c.is_not_found() => StatusCode::NOT_FOUND,
        ErrorCode::ValidationFailed | ErrorCode::InvalidWebhook => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::StorageTimeout => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::PaymentProviderError => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(self.0.code);
        if status.is_server_error() {
            tracing::error!(code = %self.0.code, error = %self.0.message, "request failed");
        }

        let body = ErrorResponse {
            code: self.0.code.to_string(),
            message: self.0.message,
            details: self.0.details,
        };
        (status, Json(body)).into_response()
    }
}
