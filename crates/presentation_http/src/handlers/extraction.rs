//! Vision extraction handlers

use axum::{
    Json,
    extract::{Path, State},
};
use domain::ImagePayload;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{error::ApiError, handlers::parse_session_id, state::AppState};

/// Extraction request body
#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    /// Base64-encoded image, with or without a data-URL prefix
    pub image_base64: String,
    /// Optional inline credential override for the vision provider
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Extraction response body
#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    /// The extracted text, now also stored as the session text
    pub text: String,
}

/// Extract text from an uploaded image and overwrite the session text
#[instrument(skip(state, request), fields(session_id = %id))]
pub async fn extract(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, ApiError> {
    let session = parse_session_id(&id)?;

    let image = ImagePayload::from_base64(&request.image_base64)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let text = state
        .reading_service
        .extract_to_session(session, &image, request.api_key.as_deref())
        .await?;

    Ok(Json(ExtractResponse { text }))
}
