//! Port definitions for the generative model client
//!
//! Defines the trait (port) that generation adapters must implement.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::InferenceError;

/// An inline image attached to a generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineImage {
    /// MIME type of the image (e.g. "image/png")
    pub mime_type: String,
    /// Base64-encoded image bytes
    pub data: String,
}

/// Request for content generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The prompt text
    pub prompt: String,
    /// Optional system instruction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// Optional image attachment for vision requests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<InlineImage>,
    /// Model to use (overrides config default)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Temperature for sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl GenerationRequest {
    /// Create a simple text-only request
    pub fn simple(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system: None,
            image: None,
            model: None,
            max_tokens: None,
            temperature: None,
        }
    }

    /// Create a request with a system instruction
    pub fn with_system(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: Some(system.into()),
            ..Self::simple(prompt)
        }
    }

    /// Attach an inline image to this request
    pub fn with_image(mut self, mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        self.image = Some(InlineImage {
            mime_type: mime_type.into(),
            data: data.into(),
        });
        self
    }

    /// Set the model for this request
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set temperature
    pub const fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

/// Response from content generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Generated content
    pub content: String,
    /// Model that generated the response
    pub model: String,
    /// Token usage statistics
    pub usage: Option<TokenUsage>,
    /// Finish reason reported by the service
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// A model known to the configured account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model identifier (e.g. "models/gemini-2.5-flash")
    pub name: String,
    /// Human-readable name
    pub display_name: Option<String>,
    /// Whether the model supports content generation
    pub supports_generation: bool,
}

/// Port for generative model implementations
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Generate a complete response for the request
    ///
    /// The API key is passed per call so callers can swap credentials
    /// without rebuilding the client.
    async fn generate(
        &self,
        request: GenerationRequest,
        api_key: &str,
    ) -> Result<GenerationResponse, InferenceError>;

    /// List the models available to the given account
    async fn list_models(&self, api_key: &str) -> Result<Vec<ModelInfo>, InferenceError>;

    /// Get the current default model for chat generation
    fn default_model(&self) -> &str;

    /// Get the model used for vision text extraction
    fn vision_model(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_request_simple() {
        let req = GenerationRequest::simple("Hello");
        assert_eq!(req.prompt, "Hello");
        assert!(req.system.is_none());
        assert!(req.image.is_none());
        assert!(req.model.is_none());
    }

    #[test]
    fn generation_request_with_system() {
        let req = GenerationRequest::with_system("You are helpful", "Hi");
        assert_eq!(req.system.as_deref(), Some("You are helpful"));
        assert_eq!(req.prompt, "Hi");
    }

    #[test]
    fn generation_request_with_image() {
        let req = GenerationRequest::simple("Read this").with_image("image/png", "aGVsbG8=");
        let image = req.image.unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, "aGVsbG8=");
    }

    #[test]
    fn generation_request_with_model() {
        let req = GenerationRequest::simple("Test").with_model("my-model");
        assert_eq!(req.model, Some("my-model".to_string()));
    }

    #[test]
    fn generation_request_chaining() {
        let req = GenerationRequest::simple("Test")
            .with_model("gemini-2.5-pro")
            .with_temperature(0.3);
        assert_eq!(req.model, Some("gemini-2.5-pro".to_string()));
        assert_eq!(req.temperature, Some(0.3));
    }

    #[test]
    fn generation_request_skip_none_fields() {
        let req = GenerationRequest::simple("Test");
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("model"));
        assert!(!json.contains("image"));
        assert!(!json.contains("temperature"));
    }

    #[test]
    fn generation_response_creation() {
        let resp = GenerationResponse {
            content: "Hello!".to_string(),
            model: "gemini-2.5-flash".to_string(),
            usage: None,
            finish_reason: Some("STOP".to_string()),
        };
        assert_eq!(resp.content, "Hello!");
        assert_eq!(resp.model, "gemini-2.5-flash");
    }

    #[test]
    fn token_usage_serialization() {
        let usage = TokenUsage {
            prompt_tokens: 100,
            completion_tokens: 50,
            total_tokens: 150,
        };
        let json = serde_json::to_string(&usage).unwrap();
        assert!(json.contains("prompt_tokens"));
        assert!(json.contains("100"));
    }

    #[test]
    fn model_info_serialization() {
        let info = ModelInfo {
            name: "models/gemini-2.5-flash".to_string(),
            display_name: Some("Gemini 2.5 Flash".to_string()),
            supports_generation: true,
        };
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("models/gemini-2.5-flash"));
        assert!(json.contains("supports_generation"));
    }
}
