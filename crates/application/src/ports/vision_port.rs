//! Ports for the generative model: chat inference and vision extraction

use async_trait::async_trait;
use domain::ImagePayload;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;
use crate::services::Credential;

/// Result of an inference call
#[derive(Debug, Clone)]
pub struct InferenceResult {
    /// Generated response content
    pub content: String,
    /// Model used for generation
    pub model: String,
    /// Number of tokens used (if available)
    pub tokens_used: Option<u32>,
    /// Latency in milliseconds
    pub latency_ms: u64,
}

/// A model available to the configured account
#[derive(Debug, Clone)]
pub struct ModelEntry {
    /// Model identifier
    pub name: String,
    /// Human-readable name
    pub display_name: Option<String>,
    /// Whether the model supports content generation
    pub supports_generation: bool,
}

/// Port for text generation operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait InferencePort: Send + Sync {
    /// Generate a response for a single message
    async fn generate(
        &self,
        message: &str,
        credential: &Credential,
    ) -> Result<InferenceResult, ApplicationError>;

    /// List the models available to the account behind the credential
    async fn list_models(
        &self,
        credential: &Credential,
    ) -> Result<Vec<ModelEntry>, ApplicationError>;

    /// Get the name of the current chat model
    fn current_model(&self) -> String;
}

/// Port for vision text extraction
///
/// Exactly one network call per invocation; no retry. The fixed extraction
/// instruction lives in the adapter.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait VisionPort: Send + Sync {
    /// Extract all text from the image, returned as one plain string
    async fn extract_text(
        &self,
        image: &ImagePayload,
        credential: &Credential,
    ) -> Result<String, ApplicationError>;
}
