//! Voice catalog handlers

use application::ports::VoiceCatalogEntry;
use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Voice catalog response body
#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    /// Every voice across the configured backends
    pub voices: Vec<VoiceCatalogEntry>,
}

/// List the voices of every narration backend
#[instrument(skip(state))]
pub async fn list_voices(State(state): State<AppState>) -> Result<Json<VoicesResponse>, ApiError> {
    let voices = state.reading_service.list_voices().await?;

    Ok(Json(VoicesResponse { voices }))
}
