//! HTTP request handlers

pub mod chat;
pub mod extraction;
pub mod health;
pub mod models;
pub mod narration;
pub mod session;
pub mod voices;

use domain::SessionId;

use crate::error::ApiError;

/// Parse a session id path segment
pub(crate) fn parse_session_id(raw: &str) -> Result<SessionId, ApiError> {
    SessionId::parse(raw)
        .map_err(|_| ApiError::BadRequest(format!("Invalid session id: {raw}")))
}
