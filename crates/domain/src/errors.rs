//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Image payload could not be decoded as a raster image
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// Identifier could not be parsed
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    /// Entity not found
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_creates_correct_error() {
        let err = DomainError::not_found("Session", "123");
        match err {
            DomainError::NotFound { entity_type, id } => {
                assert_eq!(entity_type, "Session");
                assert_eq!(id, "123");
            },
            _ => unreachable!("Expected NotFound error"),
        }
    }

    #[test]
    fn not_found_error_message_is_correct() {
        let err = DomainError::not_found("Session", "123");
        assert_eq!(err.to_string(), "Session not found: 123");
    }

    #[test]
    fn invalid_image_error_message() {
        let err = DomainError::InvalidImage("not a raster format".to_string());
        assert_eq!(err.to_string(), "Invalid image: not a raster format");
    }

    #[test]
    fn invalid_id_error_message() {
        let err = DomainError::InvalidId("abc".to_string());
        assert_eq!(err.to_string(), "Invalid identifier: abc");
    }
}
