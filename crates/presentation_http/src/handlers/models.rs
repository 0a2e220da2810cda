//! Model catalog handlers

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Model catalog response body
#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    /// Generation-capable models available to the configured account
    pub models: Vec<ModelSummary>,
}

/// One model in the catalog
#[derive(Debug, Serialize)]
pub struct ModelSummary {
    /// Model identifier (e.g. "models/gemini-2.5-flash")
    pub name: String,
    /// Human-readable name, when the service provides one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// List the generation-capable models for the configured account
#[instrument(skip(state))]
pub async fn list_models(State(state): State<AppState>) -> Result<Json<ModelsResponse>, ApiError> {
    let models = state.chat_service.list_generation_models(None).await?;

    Ok(Json(ModelsResponse {
        models: models
            .into_iter()
            .map(|m| ModelSummary {
                name: m.name,
                display_name: m.display_name,
            })
            .collect(),
    }))
}
