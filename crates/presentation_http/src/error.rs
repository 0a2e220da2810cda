//! API error handling
//!
//! Converts application failures into JSON error responses. Every
//! external-call failure surfaces as a user-visible message; nothing
//! terminates the server, and the client is free to re-submit.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    #[error("Upstream failure: {0}")]
    BadGateway(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Machine-readable error code
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            Self::EmptyInput(msg) => (StatusCode::BAD_REQUEST, "empty_input", msg),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            Self::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "rate_limited",
                "Rate limit exceeded".to_string(),
            ),
            Self::ConfigurationMissing(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "configuration_missing",
                msg,
            ),
            Self::BadGateway(msg) => (StatusCode::BAD_GATEWAY, "upstream_failure", msg),
            Self::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", msg)
            },
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::ConfigurationMissing(msg) => Self::ConfigurationMissing(msg),
            ApplicationError::NotAuthorized(msg) => Self::Unauthorized(msg),
            ApplicationError::RateLimited => Self::RateLimited,
            ApplicationError::EmptyInput(msg) => Self::EmptyInput(msg),
            ApplicationError::InvalidInput(msg) => Self::BadRequest(msg),
            ApplicationError::Network(msg) => Self::BadGateway(msg),
            ApplicationError::ExternalService(msg) => Self::ServiceUnavailable(msg),
            ApplicationError::NotFound(msg) => Self::NotFound(msg),
            ApplicationError::Configuration(msg) | ApplicationError::Internal(msg) => {
                Self::Internal(msg)
            },
        }
    }
}
