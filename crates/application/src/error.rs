//! Application-level errors
//!
//! Carries the failure taxonomy the handlers report to users:
//! configuration-missing, authentication-invalid, quota-exceeded,
//! network-failure, empty-input and generic provider failure.

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A required credential is neither configured nor supplied inline
    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    /// A credential was rejected by the remote service
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// Rate limit or quota exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Input was empty where content is required
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Input was present but unusable
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Could not reach the remote service
    #[error("Network failure: {0}")]
    Network(String),

    /// The remote service failed
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Entity not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
