//! Google Translate voice provider
//!
//! The free text-to-speech endpoint behind Google Translate's speaker
//! button. The voice selector is a language code ("en", "vi", "de", ...);
//! no credential is needed and the response is a complete MP3 payload.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::{NarrationRequest, Narrator};
use crate::types::{AudioData, AudioFormat, NarrationBackend, VoiceInfo};

/// Narrator backed by the Google Translate voice endpoint
#[derive(Debug, Clone)]
pub struct GoogleTranslateNarrator {
    client: Client,
    config: SpeechConfig,
}

impl GoogleTranslateNarrator {
    /// Create a new translate voice narrator
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

    /// Build the synthesis endpoint URL
    fn tts_url(&self) -> String {
        format!("{}/translate_tts", self.config.translate_base_url)
    }
}

#[async_trait]
impl Narrator for GoogleTranslateNarrator {
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

        let language = request.voice.as_deref().unwrap_or(&self.config.translate_voice);

        debug!(language, "Synthesizing speech with translate voice");

        let response = self
            .client
            .get(self.tts_url())
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return match status.as_u16() {
                429 => Err(SpeechError::RateLimited),
                404 => Err(SpeechError::VoiceNotFound(language.to_string())),
                _ => Err(SpeechError::SynthesisFailed(format!(
                    "HTTP {status}: {body}"
                ))),
            };
        }

        let audio_bytes: Bytes = response
            .bytes()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to read audio: {e}")))?;

        if audio_bytes.is_empty() {
            return Err(SpeechError::InvalidResponse(
                "Service returned an empty audio payload".to_string(),
            ));
        }

        debug!(audio_size = audio_bytes.len(), "Translate voice synthesis complete");

        Ok(AudioData::new(audio_bytes.to_vec(), AudioFormat::Mp3))
    }

    async fn list_voices(&self) -> Result<Vec<VoiceInfo>, SpeechError> {
        // The endpoint has no voice catalog; the selector is a language code.
        Ok(vec![
            VoiceInfo::new("en", "English").with_languages(vec!["en".to_string()]),
            VoiceInfo::new("vi", "Vietnamese").with_languages(vec!["vi".to_string()]),
            VoiceInfo::new("de", "German").with_languages(vec!["de".to_string()]),
            VoiceInfo::new("es", "Spanish").with_languages(vec!["es".to_string()]),
            VoiceInfo::new("fr", "French").with_languages(vec!["fr".to_string()]),
            VoiceInfo::new("ja", "Japanese").with_languages(vec!["ja".to_string()]),
            VoiceInfo::new("ko", "Korean").with_languages(vec!["ko".to_string()]),
            VoiceInfo::new("zh-CN", "Chinese (Mandarin)")
                .with_languages(vec!["zh".to_string()]),
        ])
    }

    fn backend(&self) -> NarrationBackend {
        NarrationBackend::Translate
    }

    fn default_voice(&self) -> &str {
        &self.config.translate_voice
    }
}
