//! Session text handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{error::ApiError, handlers::parse_session_id, state::AppState};

/// Session text response body
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionTextResponse {
    /// The session's current text
    pub text: String,
}

/// Session text edit body
#[derive(Debug, Deserialize)]
pub struct SessionTextRequest {
    /// The replacement text
    pub text: String,
}

/// Read the session's current text
#[instrument(skip(state), fields(session_id = %id))]
pub async fn get_text(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionTextResponse>, ApiError> {
    let session = parse_session_id(&id)?;

    Ok(Json(SessionTextResponse {
        text: state.reading_service.session_text(session),
    }))
}

/// Directly edit the session's text (overwrites wholesale)
#[instrument(skip(state, request), fields(session_id = %id, text_len = request.text.len()))]
pub async fn put_text(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SessionTextRequest>,
) -> Result<StatusCode, ApiError> {
    let session = parse_session_id(&id)?;

    state.reading_service.set_session_text(session, request.text);

    Ok(StatusCode::NO_CONTENT)
}

/// End the session, dropping its text
#[instrument(skip(state), fields(session_id = %id))]
pub async fn end_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let session = parse_session_id(&id)?;

    state.reading_service.end_session(session);

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_text_response_roundtrip() {
        let response = SessionTextResponse {
            text: "Tiếng Việt".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        let parsed: SessionTextResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.text, "Tiếng Việt");
    }

    #[test]
    fn session_text_request_deserialize() {
        let json = r#"{"text": "edited"}"#;
        let request: SessionTextRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.text, "edited");
    }

    #[test]
    fn session_text_request_accepts_empty_string() {
        let json = r#"{"text": ""}"#;
        let request: SessionTextRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.text, "");
    }
}
