//! Chat service - Simple conversation handling

use std::{fmt, sync::Arc};

use domain::{ChatMessage, MessageMetadata};
use tracing::{debug, instrument};

use crate::error::ApplicationError;
use crate::ports::{InferencePort, ModelEntry};
use crate::services::credential_resolver::{CredentialResolver, Provider, Resolution};

/// Service for handling chat messages
pub struct ChatService {
    inference: Arc<dyn InferencePort>,
    resolver: Arc<CredentialResolver>,
}

impl fmt::Debug for ChatService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatService").finish_non_exhaustive()
    }
}

impl ChatService {
    /// Create a new chat service
    pub fn new(inference: Arc<dyn InferencePort>, resolver: Arc<CredentialResolver>) -> Self {
        Self {
            inference,
            resolver,
        }
    }

    /// Handle a single chat message (stateless)
    #[instrument(skip(self, message, override_key), fields(message_len = message.len()))]
    pub async fn chat(
        &self,
        message: &str,
        override_key: Option<&str>,
    ) -> Result<ChatMessage, ApplicationError> {
        let credential = self.resolver.require(Provider::Google, override_key).await?;

        let result = self.inference.generate(message, &credential).await?;

        debug!(
            model = %result.model,
            tokens = ?result.tokens_used,
            latency_ms = result.latency_ms,
            "Chat response generated"
        );

        let response = ChatMessage::assistant(&result.content).with_metadata(MessageMetadata {
            model: Some(result.model),
            tokens: result.tokens_used,
            latency_ms: Some(result.latency_ms),
        });

        Ok(response)
    }

    /// List the generation-capable models available to the account
    #[instrument(skip(self, override_key))]
    pub async fn list_generation_models(
        &self,
        override_key: Option<&str>,
    ) -> Result<Vec<ModelEntry>, ApplicationError> {
        let credential = self.resolver.require(Provider::Google, override_key).await?;

        let models = self.inference.list_models(&credential).await?;

        Ok(models
            .into_iter()
            .filter(|m| m.supports_generation)
            .collect())
    }

    /// Whether a credential for the generation endpoint is available
    pub async fn is_configured(&self) -> bool {
        matches!(
            self.resolver.resolve(Provider::Google, None).await,
            Ok(Resolution::Configured(_) | Resolution::Override(_))
        )
    }

    /// Get the current chat model name
    pub fn current_model(&self) -> String {
        self.inference.current_model()
    }
}
