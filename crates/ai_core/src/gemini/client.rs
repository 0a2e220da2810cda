//! Gemini generateContent client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::InferenceConfig;
use crate::error::InferenceError;
use crate::ports::{
    GenerationRequest, GenerationResponse, GenerativeModel, ModelInfo, TokenUsage,
};

/// API key header understood by the generation endpoint
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Generative model client for the Gemini REST API
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    config: InferenceConfig,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(config: InferenceConfig) -> Result<Self, InferenceError> {
        config.validate().map_err(InferenceError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| InferenceError::Configuration(format!("Failed to create HTTP client: {e}")))?;

        info!(
            base_url = %config.base_url,
            model = %config.default_model,
            "Initialized Gemini client"
        );

        Ok(Self { client, config })
    }

    /// Build the generateContent URL for a given model
    fn generate_url(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.config.base_url, model)
    }

    /// Build the model catalog URL
    fn models_url(&self) -> String {
        format!("{}/v1beta/models", self.config.base_url)
    }

    /// Get the model to use for a request
    fn resolve_model<'a>(&'a self, request: &'a GenerationRequest) -> &'a str {
        request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model)
    }

    /// Classify a non-success response into an inference error
    fn classify_failure(status: reqwest::StatusCode, body: &str) -> InferenceError {
        // The service wraps failures in {"error": {code, message, status}}
        if let Ok(api_error) = serde_json::from_str::<ApiErrorEnvelope>(body) {
            let detail = api_error.error;
            return match detail.status.as_deref() {
                Some("UNAUTHENTICATED" | "PERMISSION_DENIED") => {
                    InferenceError::Unauthorized(detail.message)
                },
                Some("RESOURCE_EXHAUSTED") => InferenceError::RateLimited,
                Some("NOT_FOUND") => InferenceError::ModelNotAvailable(detail.message),
                _ => InferenceError::ServerError(detail.message),
            };
        }

        match status.as_u16() {
            401 | 403 => InferenceError::Unauthorized(format!("HTTP {status}")),
            429 => InferenceError::RateLimited,
            404 => InferenceError::ModelNotAvailable(format!("HTTP {status}: {body}")),
            _ => InferenceError::ServerError(format!("HTTP {status}: {body}")),
        }
    }
}

/// generateContent request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

/// generateContent response body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: Option<u32>,
    #[serde(default)]
    candidates_token_count: Option<u32>,
    #[serde(default)]
    total_token_count: Option<u32>,
}

/// Model catalog response body
#[derive(Debug, Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<CatalogModel>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogModel {
    name: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

/// API error envelope
#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
    #[serde(default)]
    status: Option<String>,
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    #[instrument(skip(self, request, api_key), fields(model = %self.resolve_model(&request), has_image = request.image.is_some()))]
    async fn generate(
        &self,
        request: GenerationRequest,
        api_key: &str,
    ) -> Result<GenerationResponse, InferenceError> {
        let model = self.resolve_model(&request).to_string();

        let mut parts = Vec::new();
        if let Some(image) = &request.image {
            parts.push(Part {
                text: None,
                inline_data: Some(InlineData {
                    mime_type: image.mime_type.clone(),
                    data: image.data.clone(),
                }),
            });
        }
        parts.push(Part::text(&request.prompt));

        let body = GenerateContentRequest {
            contents: vec![Content { parts }],
            system_instruction: request
                .system
                .as_ref()
                .map(|s| Content { parts: vec![Part::text(s)] }),
            generation_config: Some(GenerationConfig {
                temperature: request.temperature.or(Some(self.config.temperature)),
                max_output_tokens: request.max_tokens.or(Some(self.config.max_tokens)),
            }),
        };

        debug!("Sending generateContent request");

        let response = self
            .client
            .post(self.generate_url(&model))
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Generation request failed");
            return Err(Self::classify_failure(status, &body));
        }

        let content_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        let candidate = content_response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| {
                InferenceError::InvalidResponse("Response contained no candidates".to_string())
            })?;

        let content = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .filter(|text| !text.is_empty())
            .ok_or_else(|| {
                InferenceError::InvalidResponse("Response contained no text".to_string())
            })?;

        let usage = content_response.usage_metadata.and_then(|u| {
            match (u.prompt_token_count, u.candidates_token_count) {
                (Some(prompt), Some(completion)) => Some(TokenUsage {
                    prompt_tokens: prompt,
                    completion_tokens: completion,
                    total_tokens: u.total_token_count.unwrap_or(prompt + completion),
                }),
                _ => None,
            }
        });

        debug!(content_len = content.len(), tokens = ?usage, "Generation completed");

        Ok(GenerationResponse {
            content,
            model: content_response.model_version.unwrap_or(model),
            usage,
            finish_reason: candidate.finish_reason,
        })
    }

    #[instrument(skip(self, api_key))]
    async fn list_models(&self, api_key: &str) -> Result<Vec<ModelInfo>, InferenceError> {
        let response = self
            .client
            .get(self.models_url())
            .header(API_KEY_HEADER, api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Model catalog request failed");
            return Err(Self::classify_failure(status, &body));
        }

        let catalog: ListModelsResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        debug!(model_count = catalog.models.len(), "Model catalog fetched");

        Ok(catalog
            .models
            .into_iter()
            .map(|m| ModelInfo {
                supports_generation: m
                    .supported_generation_methods
                    .iter()
                    .any(|method| method == "generateContent"),
                name: m.name,
                display_name: m.display_name,
            })
            .collect())
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    fn vision_model(&self) -> &str {
        &self.config.vision_model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> GeminiClient {
        GeminiClient::new(InferenceConfig::default()).unwrap()
    }

    #[test]
    fn generate_url_includes_model() {
        let client = test_client();
        assert_eq!(
            client.generate_url("gemini-2.5-flash"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn models_url_is_correct() {
        let client = test_client();
        assert_eq!(
            client.models_url(),
            "https://generativelanguage.googleapis.com/v1beta/models"
        );
    }

    #[test]
    fn resolve_model_prefers_request_model() {
        let client = test_client();
        let request = GenerationRequest::simple("hi").with_model("gemini-2.5-pro");
        assert_eq!(client.resolve_model(&request), "gemini-2.5-pro");
    }

    #[test]
    fn resolve_model_falls_back_to_default() {
        let client = test_client();
        let request = GenerationRequest::simple("hi");
        assert_eq!(client.resolve_model(&request), "gemini-2.5-flash");
    }

    #[test]
    fn classify_unauthenticated_status() {
        let body = r#"{"error":{"code":401,"message":"API key not valid","status":"UNAUTHENTICATED"}}"#;
        let err = GeminiClient::classify_failure(reqwest::StatusCode::UNAUTHORIZED, body);
        assert!(matches!(err, InferenceError::Unauthorized(_)));
    }

    #[test]
    fn classify_permission_denied_status() {
        let body =
            r#"{"error":{"code":403,"message":"expired key","status":"PERMISSION_DENIED"}}"#;
        let err = GeminiClient::classify_failure(reqwest::StatusCode::FORBIDDEN, body);
        assert!(matches!(err, InferenceError::Unauthorized(_)));
    }

    #[test]
    fn classify_resource_exhausted_status() {
        let body =
            r#"{"error":{"code":429,"message":"quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;
        let err = GeminiClient::classify_failure(reqwest::StatusCode::TOO_MANY_REQUESTS, body);
        assert!(matches!(err, InferenceError::RateLimited));
    }

    #[test]
    fn classify_falls_back_to_http_status() {
        let err = GeminiClient::classify_failure(reqwest::StatusCode::UNAUTHORIZED, "not json");
        assert!(matches!(err, InferenceError::Unauthorized(_)));

        let err =
            GeminiClient::classify_failure(reqwest::StatusCode::TOO_MANY_REQUESTS, "not json");
        assert!(matches!(err, InferenceError::RateLimited));

        let err = GeminiClient::classify_failure(reqwest::StatusCode::BAD_GATEWAY, "oops");
        assert!(matches!(err, InferenceError::ServerError(_)));
    }

    #[test]
    fn request_body_serializes_inline_image_first() {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: "image/png".to_string(),
                            data: "aGVsbG8=".to_string(),
                        }),
                    },
                    Part::text("Extract all text"),
                ],
            }],
            system_instruction: None,
            generation_config: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("inlineData"));
        assert!(json.contains("mimeType"));
        let image_pos = json.find("inlineData").unwrap();
        let text_pos = json.find("Extract all text").unwrap();
        assert!(image_pos < text_pos);
    }

    #[test]
    fn response_body_deserializes() {
        let json = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "Hello!"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {
                "promptTokenCount": 4,
                "candidatesTokenCount": 2,
                "totalTokenCount": 6
            },
            "modelVersion": "gemini-2.5-flash"
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.candidates.len(), 1);
        assert_eq!(parsed.model_version.as_deref(), Some("gemini-2.5-flash"));
    }

    #[test]
    fn catalog_model_deserializes() {
        let json = r#"{
            "models": [
                {"name": "models/gemini-2.5-flash", "displayName": "Gemini 2.5 Flash",
                 "supportedGenerationMethods": ["generateContent", "countTokens"]},
                {"name": "models/embedding-001",
                 "supportedGenerationMethods": ["embedContent"]}
            ]
        }"#;
        let parsed: ListModelsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.models.len(), 2);
        assert!(parsed.models[0]
            .supported_generation_methods
            .contains(&"generateContent".to_string()));
    }
}
