//! Gemini adapter - Implements InferencePort and VisionPort using ai_core

use std::time::Instant;

use ai_core::{GeminiClient, GenerationRequest, GenerativeModel, InferenceConfig};
use application::{
    error::ApplicationError,
    ports::{InferencePort, InferenceResult, ModelEntry, VisionPort},
    services::Credential,
};
use async_trait::async_trait;
use domain::ImagePayload;
use tracing::{debug, instrument};

/// Instruction sent with every extraction request
const EXTRACTION_INSTRUCTION: &str = "Extract all text from this image. Preserve the original \
     structure, paragraphs, and lists. Return ONLY the extracted text. Do not include markdown \
     code blocks or any introductory or concluding remarks.";

/// Adapter for the Gemini generation endpoint
#[derive(Debug)]
pub struct GeminiInferenceAdapter {
    engine: GeminiClient,
}

impl GeminiInferenceAdapter {
    /// Create a new adapter with the given configuration
    pub fn new(config: InferenceConfig) -> Result<Self, ApplicationError> {
        let engine = GeminiClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;

        Ok(Self { engine })
    }

    /// Convert ai_core error to application error
    fn map_error(e: ai_core::InferenceError) -> ApplicationError {
        use ai_core::InferenceError;
        match e {
            InferenceError::Unauthorized(msg) => ApplicationError::NotAuthorized(msg),
            InferenceError::RateLimited => ApplicationError::RateLimited,
            InferenceError::ConnectionFailed(msg) => {
                ApplicationError::Network(format!("Generation endpoint unreachable: {msg}"))
            },
            InferenceError::Timeout(ms) => {
                ApplicationError::Network(format!("Generation timed out after {ms}ms"))
            },
            other => ApplicationError::ExternalService(other.to_string()),
        }
    }
}

#[async_trait]
impl InferencePort for GeminiInferenceAdapter {
    #[instrument(skip(self, message, credential), fields(message_len = message.len()))]
    async fn generate(
        &self,
        message: &str,
        credential: &Credential,
    ) -> Result<InferenceResult, ApplicationError> {
        let start = Instant::now();

        let response = self
            .engine
            .generate(GenerationRequest::simple(message), credential.expose())
            .await
            .map_err(Self::map_error)?;

        let latency_ms = start.elapsed().as_millis() as u64;

        debug!(
            model = %response.model,
            tokens = ?response.usage.as_ref().map(|u| u.total_tokens),
            latency_ms,
            "Generation completed"
        );

        Ok(InferenceResult {
            content: response.content,
            model: response.model,
            tokens_used: response.usage.map(|u| u.total_tokens),
            latency_ms,
        })
    }

    #[instrument(skip(self, credential))]
    async fn list_models(
        &self,
        credential: &Credential,
    ) -> Result<Vec<ModelEntry>, ApplicationError> {
        let models = self
            .engine
            .list_models(credential.expose())
            .await
            .map_err(Self::map_error)?;

        Ok(models
            .into_iter()
            .map(|m| ModelEntry {
                name: m.name,
                display_name: m.display_name,
                supports_generation: m.supports_generation,
            })
            .collect())
    }

    fn current_model(&self) -> String {
        self.engine.default_model().to_string()
    }
}

#[async_trait]
impl VisionPort for GeminiInferenceAdapter {
    #[instrument(skip(self, image, credential), fields(image_size = image.size_bytes(), mime = image.mime_type()))]
    async fn extract_text(
        &self,
        image: &ImagePayload,
        credential: &Credential,
    ) -> Result<String, ApplicationError> {
        let request = GenerationRequest::simple(EXTRACTION_INSTRUCTION)
            .with_image(image.mime_type(), image.to_base64())
            .with_model(self.engine.vision_model());

        let response = self
            .engine
            .generate(request, credential.expose())
            .await
            .map_err(Self::map_error)?;

        let text = response.content.trim().to_string();

        debug!(text_len = text.len(), "Vision extraction completed");

        Ok(text)
    }
}
