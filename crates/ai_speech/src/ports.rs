//! Port definitions for narration
//!
//! Defines the trait (port) that narration adapters must implement.

use async_trait::async_trait;

use crate::error::SpeechError;
use crate::types::{AudioData, NarrationBackend, VoiceInfo};

/// Request for speech synthesis
///
/// The credential, when present, has already been resolved by the caller
/// (configured default or per-request override). Backends that need no
/// authentication ignore it.
#[derive(Debug, Clone)]
pub struct NarrationRequest {
    /// Text to narrate
    pub text: String,
    /// Voice selector meaningful to the chosen backend
    /// (language code, neural voice name, or voice id)
    pub voice: Option<String>,
    /// Resolved credential for backends that require one
    pub credential: Option<String>,
}

impl NarrationRequest {
    /// Create a request with the default voice and no credential
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: None,
            credential: None,
        }
    }

    /// Select a voice
    #[must_use]
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    /// Attach a resolved credential
    #[must_use]
    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(credential.into());
        self
    }

    /// The input text with surrounding whitespace removed
    #[must_use]
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }
}

/// Port for narration implementations
///
/// Implementations convert text to a single complete audio payload.
/// One network round trip per invocation; no retry, no caching, and
/// empty input is rejected before any network traffic.
#[async_trait]
pub trait Narrator: Send + Sync {
    /// Synthesize speech for the request
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::EmptyInput` for blank text without issuing a
    /// network call, and the backend's classified error otherwise.
    async fn narrate(&self, request: &NarrationRequest) -> Result<AudioData, SpeechError>;

    /// List the voices this backend knows about
    async fn list_voices(&self) -> Result<Vec<VoiceInfo>, SpeechError>;

    /// The backend this narrator implements
    fn backend(&self) -> NarrationBackend;

    /// The voice used when the request names none
    fn default_voice(&self) -> &str;
}
