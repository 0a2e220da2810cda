//! Narration handlers

use application::ports::NarrationBackend;
use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::instrument;

use crate::{error::ApiError, handlers::parse_session_id, state::AppState};

/// Narration request body
#[derive(Debug, Deserialize)]
pub struct NarrateRequest {
    /// Narration backend; falls back to the configured default
    #[serde(default)]
    pub provider: Option<NarrationBackend>,
    /// Backend-specific voice selector
    #[serde(default)]
    pub voice: Option<String>,
    /// Optional inline credential override (premium backend)
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Narrate the session's current text, returning the audio bytes
#[instrument(skip(state, request), fields(session_id = %id))]
pub async fn narrate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<NarrateRequest>,
) -> Result<Response, ApiError> {
    let session = parse_session_id(&id)?;

    let backend = request
        .provider
        .unwrap_or_else(|| configured_default(&state));

    let result = state
        .reading_service
        .narrate_session(session, backend, request.voice, request.api_key.as_deref())
        .await?;

    Ok((
        [(header::CONTENT_TYPE, result.mime_type)],
        Bytes::from(result.audio),
    )
        .into_response())
}

/// Map the configured default backend into the request selector
fn configured_default(state: &AppState) -> NarrationBackend {
    match state.config.speech.default_backend {
        ai_speech::NarrationBackend::Translate => NarrationBackend::Translate,
        ai_speech::NarrationBackend::Edge => NarrationBackend::Edge,
        ai_speech::NarrationBackend::ElevenLabs => NarrationBackend::ElevenLabs,
    }
}
