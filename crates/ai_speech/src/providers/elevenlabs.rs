//! ElevenLabs voice provider
//!
//! The premium backend: a voice id plus an API key, one POST per
//! invocation, MP3 back. An invalid or expired key is reported as
//! `Unauthorized`, distinct from quota and generic failures.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::{NarrationRequest, Narrator};
use crate::types::{AudioData, AudioFormat, NarrationBackend, VoiceInfo};

/// API key header understood by the service
const API_KEY_HEADER: &str = "xi-api-key";

/// Narrator backed by the ElevenLabs API
#[derive(Debug, Clone)]
pub struct ElevenLabsNarrator {
    client: Client,
    config: SpeechConfig,
}

impl ElevenLabsNarrator {
    /// Create a new ElevenLabs narrator
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid.
    pub fn new(config: SpeechConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    /// Build the synthesis URL for a voice id
    fn tts_url(&self, voice_id: &str) -> String {
        format!(
            "{}/v1/text-to-speech/{voice_id}",
            self.config.elevenlabs_base_url
        )
    }

    /// Pick the credential: per-request first, configured key second
    fn resolve_credential<'a>(&'a self, request: &'a NarrationRequest) -> Option<&'a str> {
        request
            .credential
            .as_deref()
            .or(self.config.elevenlabs_api_key.as_deref())
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

/// Synthesis request body
#[derive(Debug, Serialize)]
struct TtsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

/// API error response
#[derive(Debug, Deserialize)]
struct ApiError {
    detail: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    #[allow(dead_code)] // Part of the API contract, kept for completeness
    message: Option<String>,
}

#[async_trait]
impl Narrator for ElevenLabsNarrator {
    #[instrument(skip(self, request), fields(text_len = request.text.len()))]
    async fn narrate(&self, request: &NarrationRequest) -> Result<AudioData, SpeechError> {
        let text = request.trimmed_text();
        if text.is_empty() {
            return Err(SpeechError::EmptyInput);
        }

        if text.len() > self.config.max_text_len {
            return Err(SpeechError::SynthesisFailed(format!(
                "Text too long: {} characters exceeds {} limit",
                text.len(),
                self.config.max_text_len
            )));
        }

        let Some(api_key) = self.resolve_credential(request) else {
            return Err(SpeechError::MissingCredential("elevenlabs".to_string()));
        };

        let voice_id = request
            .voice
            .as_deref()
            .unwrap_or(&self.config.elevenlabs_voice);

        debug!(voice_id, "Synthesizing speech with ElevenLabs");

        let body = TtsRequest {
            text,
            model_id: &self.config.elevenlabs_model,
        };

        let response = self
            .client
            .post(self.tts_url(voice_id))
            .header(API_KEY_HEADER, api_key)
            .header(reqwest::header::ACCEPT, "audio/mpeg")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status = %status, "ElevenLabs request failed");

            // The service reports the failure class in the response detail
            let detail_status = serde_json::from_str::<ApiError>(&error_body)
                .ok()
                .and_then(|e| e.detail.status);

            return match (status.as_u16(), detail_status.as_deref()) {
                (401, _) | (_, Some("invalid_api_key" | "needs_authorization")) => {
                    Err(SpeechError::Unauthorized(
                        "API key rejected by ElevenLabs".to_string(),
                    ))
                },
                (429, _) | (_, Some("quota_exceeded")) => Err(SpeechError::RateLimited),
                (404, _) | (_, Some("voice_not_found")) => {
                    Err(SpeechError::VoiceNotFound(voice_id.to_string()))
                },
                _ => Err(SpeechError::SynthesisFailed(format!(
                    "HTTP {status}: {error_body}"
                ))),
            };
        }

        let audio_bytes: Bytes = response
            .bytes()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to read audio: {e}")))?;

        debug!(audio_size = audio_bytes.len(), "ElevenLabs synthesis complete");

        Ok(AudioData::new(audio_bytes.to_vec(), AudioFormat::Mp3))
    }

    async fn list_voices(&self) -> Result<Vec<VoiceInfo>, SpeechError> {
        // Premade voices available to every account
        Ok(vec![
            VoiceInfo::new("21m00Tcm4TlvDq8ikWAM", "Rachel")
                .with_languages(vec!["en".to_string()]),
            VoiceInfo::new("pNInz6obpgDQGcFmaJgB", "Adam")
                .with_languages(vec!["en".to_string()]),
            VoiceInfo::new("EXAVITQu4vr4xnSDxMaL", "Bella")
                .with_languages(vec!["en".to_string()]),
            VoiceInfo::new("ErXwobaYiN019PkySvjV", "Antoni")
                .with_languages(vec!["en".to_string()]),
        ])
    }

    fn backend(&self) -> NarrationBackend {
        NarrationBackend::ElevenLabs
    }

    fn default_voice(&self) -> &str {
        &self.config.elevenlabs_voice
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn narrator_for(mock_server: &MockServer) -> ElevenLabsNarrator {
        let config = SpeechConfig {
            elevenlabs_base_url: mock_server.uri(),
            elevenlabs_api_key: Some("xi-configured-key".to_string()),
            ..Default::default()
        };
        ElevenLabsNarrator::new(config).unwrap()
    }

    fn narrator_without_key(mock_server: &MockServer) -> ElevenLabsNarrator {
        let config = SpeechConfig {
            elevenlabs_base_url: mock_server.uri(),
            elevenlabs_api_key: None,
            ..Default::default()
        };
        ElevenLabsNarrator::new(config).unwrap()
    }

    #[tokio::test]
    async fn narrate_success_returns_mp3() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/text-to-speech/21m00Tcm4TlvDq8ikWAM"))
            .and(header("xi-api-key", "xi-configured-key"))
            .and(body_partial_json(serde_json::json!({
                "text": "Hello",
                "model_id": "eleven_multilingual_v2"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xFB, 0x90]))
            .expect(1)
            .mount(&mock_server)
            .await;

        let narrator = narrator_for(&mock_server);
        let audio = narrator
            .narrate(&NarrationRequest::new("Hello"))
            .await
            .unwrap();

        assert_eq!(audio.format(), AudioFormat::Mp3);
        assert_eq!(audio.mime_type(), "audio/mpeg");
        assert!(!audio.is_empty());
    }

    #[tokio::test]
    async fn narrate_request_credential_overrides_configured_key() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/text-to-speech/21m00Tcm4TlvDq8ikWAM"))
            .and(header("xi-api-key", "xi-override-key"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8; 32]))
            .expect(1)
            .mount(&mock_server)
            .await;

        let narrator = narrator_for(&mock_server);
        let request = NarrationRequest::new("Hello").with_credential("xi-override-key");

        assert!(narrator.narrate(&request).await.is_ok());
    }

    #[tokio::test]
    async fn narrate_uses_requested_voice_id() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/text-to-speech/pNInz6obpgDQGcFmaJgB"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8; 16]))
            .expect(1)
            .mount(&mock_server)
            .await;

        let narrator = narrator_for(&mock_server);
        let request = NarrationRequest::new("Hello").with_voice("pNInz6obpgDQGcFmaJgB");

        assert!(narrator.narrate(&request).await.is_ok());
    }

    #[tokio::test]
    async fn narrate_without_any_credential_fails_before_network() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let narrator = narrator_without_key(&mock_server);
        let result = narrator.narrate(&NarrationRequest::new("Hello")).await;

        assert!(matches!(result, Err(SpeechError::MissingCredential(_))));
    }

    #[tokio::test]
    async fn narrate_blank_credential_counts_as_missing() {
        let mock_server = MockServer::start().await;
        let narrator = narrator_without_key(&mock_server);
        let request = NarrationRequest::new("Hello").with_credential("   ");

        let result = narrator.narrate(&request).await;

        assert!(matches!(result, Err(SpeechError::MissingCredential(_))));
    }

    #[tokio::test]
    async fn narrate_empty_text_issues_no_network_call() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let narrator = narrator_for(&mock_server);
        let result = narrator.narrate(&NarrationRequest::new("")).await;

        assert!(matches!(result, Err(SpeechError::EmptyInput)));
    }

    #[tokio::test]
    async fn narrate_unauthorized_is_distinct_from_generic_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/text-to-speech/21m00Tcm4TlvDq8ikWAM"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "detail": {
                    "status": "invalid_api_key",
                    "message": "Invalid API key"
                }
            })))
            .mount(&mock_server)
            .await;

        let narrator = narrator_for(&mock_server);
        let result = narrator
            .narrate(&NarrationRequest::new("Hello").with_credential("xi-bad-key"))
            .await;

        assert!(matches!(result, Err(SpeechError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn narrate_quota_exceeded_is_rate_limited() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/text-to-speech/21m00Tcm4TlvDq8ikWAM"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "detail": {"status": "quota_exceeded", "message": "Out of characters"}
            })))
            .mount(&mock_server)
            .await;

        let narrator = narrator_for(&mock_server);
        let result = narrator.narrate(&NarrationRequest::new("Hello")).await;

        assert!(matches!(result, Err(SpeechError::RateLimited)));
    }

    #[tokio::test]
    async fn narrate_unknown_voice_is_voice_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/text-to-speech/nope"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "detail": {"status": "voice_not_found", "message": "Voice does not exist"}
            })))
            .mount(&mock_server)
            .await;

        let narrator = narrator_for(&mock_server);
        let result = narrator
            .narrate(&NarrationRequest::new("Hello").with_voice("nope"))
            .await;

        assert!(matches!(result, Err(SpeechError::VoiceNotFound(_))));
    }

    #[tokio::test]
    async fn narrate_server_error_is_generic_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/text-to-speech/21m00Tcm4TlvDq8ikWAM"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let narrator = narrator_for(&mock_server);
        let result = narrator.narrate(&NarrationRequest::new("Hello")).await;

        assert!(matches!(result, Err(SpeechError::SynthesisFailed(_))));
    }

    #[tokio::test]
    async fn list_voices_returns_premade_voices() {
        let mock_server = MockServer::start().await;
        let narrator = narrator_for(&mock_server);

        let voices = narrator.list_voices().await.unwrap();

        assert!(!voices.is_empty());
        assert!(voices.iter().any(|v| v.name == "Rachel"));
    }

    #[test]
    fn backend_and_default_voice() {
        let narrator = ElevenLabsNarrator::new(SpeechConfig::default()).unwrap();
        assert_eq!(narrator.backend(), NarrationBackend::ElevenLabs);
        assert_eq!(narrator.default_voice(), "21m00Tcm4TlvDq8ikWAM");
    }
}
