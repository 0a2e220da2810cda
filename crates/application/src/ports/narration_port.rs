//! Port for speech narration

use std::fmt;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;
use crate::services::Credential;

/// Narration backend selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrationBackend {
    /// Free translate voice; the voice selector is a language code
    Translate,
    /// Edge neural voices; the voice selector is a neural voice name
    Edge,
    /// ElevenLabs premium voices; the voice selector is a voice id
    ElevenLabs,
}

impl NarrationBackend {
    /// Whether this backend needs a credential to be resolved first
    #[must_use]
    pub const fn requires_credential(&self) -> bool {
        matches!(self, Self::ElevenLabs)
    }
}

impl fmt::Display for NarrationBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Translate => write!(f, "translate"),
            Self::Edge => write!(f, "edge"),
            Self::ElevenLabs => write!(f, "elevenlabs"),
        }
    }
}

/// A narration job handed to the adapter
///
/// The credential, when present, has already been resolved (override or
/// configured default); backends that need none ignore it.
#[derive(Debug, Clone)]
pub struct NarrationTask {
    /// Text to narrate (validated non-empty by the caller)
    pub text: String,
    /// Chosen backend
    pub backend: NarrationBackend,
    /// Backend-specific voice selector
    pub voice: Option<String>,
    /// Resolved credential, for backends that require one
    pub credential: Option<Credential>,
}

/// A complete audio payload tagged with its MIME type
#[derive(Debug, Clone)]
pub struct NarrationResult {
    /// Audio bytes
    pub audio: Vec<u8>,
    /// MIME type of the audio (e.g. "audio/mpeg")
    pub mime_type: String,
}

/// A voice known to one of the narration backends
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceCatalogEntry {
    /// Backend this voice belongs to
    pub backend: NarrationBackend,
    /// Voice selector to pass in a narration request
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Languages this voice speaks
    pub languages: Vec<String>,
}

/// Port for narration operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait NarrationPort: Send + Sync {
    /// Synthesize the task's text into one complete audio payload
    async fn narrate(&self, task: NarrationTask) -> Result<NarrationResult, ApplicationError>;

    /// List the voices of every configured backend
    async fn list_voices(&self) -> Result<Vec<VoiceCatalogEntry>, ApplicationError>;
}
