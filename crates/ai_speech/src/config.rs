//! Configuration for narration

use serde::{Deserialize, Serialize};

use crate::types::NarrationBackend;

/// Configuration for narration services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Default backend when a request does not name one
    #[serde(default = "default_backend")]
    pub default_backend: NarrationBackend,

    /// Base URL of the translate voice endpoint
    #[serde(default = "default_translate_base_url")]
    pub translate_base_url: String,

    /// Default language code for the translate voice
    #[serde(default = "default_translate_voice")]
    pub translate_voice: String,

    /// Websocket endpoint of the Edge speech service
    #[serde(default = "default_edge_endpoint")]
    pub edge_endpoint: String,

    /// Client token expected by the Edge speech service
    #[serde(default = "default_edge_token")]
    pub edge_trusted_client_token: String,

    /// Default Edge neural voice
    #[serde(default = "default_edge_voice")]
    pub edge_voice: String,

    /// Base URL of the ElevenLabs API
    #[serde(default = "default_elevenlabs_base_url")]
    pub elevenlabs_base_url: String,

    /// ElevenLabs API key (optional; per-request credentials take precedence)
    #[serde(default)]
    pub elevenlabs_api_key: Option<String>,

    /// Default ElevenLabs voice id
    #[serde(default = "default_elevenlabs_voice")]
    pub elevenlabs_voice: String,

    /// ElevenLabs synthesis model
    #[serde(default = "default_elevenlabs_model")]
    pub elevenlabs_model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum input text length in characters
    #[serde(default = "default_max_text_len")]
    pub max_text_len: usize,
}

const fn default_backend() -> NarrationBackend {
    NarrationBackend::Translate
}

fn default_translate_base_url() -> String {
    "https://translate.google.com".to_string()
}

fn default_translate_voice() -> String {
    "en".to_string()
}

fn default_edge_endpoint() -> String {
    "wss://speech.platform.bing.com/consumer/speech/synthesize/readaloud/edge/v1".to_string()
}

fn default_edge_token() -> String {
    "6A5AA1D4EAFF4E9FB37E23D68491D6F4".to_string()
}

fn default_edge_voice() -> String {
    "en-US-AriaNeural".to_string()
}

fn default_elevenlabs_base_url() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_elevenlabs_voice() -> String {
    // "Rachel", the service's canonical demo voice
    "21m00Tcm4TlvDq8ikWAM".to_string()
}

fn default_elevenlabs_model() -> String {
    "eleven_multilingual_v2".to_string()
}

const fn default_timeout_ms() -> u64 {
    30000 // 30 seconds
}

const fn default_max_text_len() -> usize {
    5000
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            default_backend: default_backend(),
            translate_base_url: default_translate_base_url(),
            translate_voice: default_translate_voice(),
            edge_endpoint: default_edge_endpoint(),
            edge_trusted_client_token: default_edge_token(),
            edge_voice: default_edge_voice(),
            elevenlabs_base_url: default_elevenlabs_base_url(),
            elevenlabs_api_key: None,
            elevenlabs_voice: default_elevenlabs_voice(),
            elevenlabs_model: default_elevenlabs_model(),
            timeout_ms: default_timeout_ms(),
            max_text_len: default_max_text_len(),
        }
    }
}

impl SpeechConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        if self.max_text_len == 0 {
            return Err("Max text length must be greater than 0".to_string());
        }

        if !self.edge_endpoint.starts_with("ws") {
            return Err(format!(
                "Edge endpoint must be a websocket URL, got {}",
                self.edge_endpoint
            ));
        }

        Ok(())
    }
}
