//! Edge neural voice provider
//!
//! Microsoft Edge's read-aloud service speaks over a websocket: the client
//! sends a speech configuration frame and an SSML frame, then collects
//! binary audio frames until the service signals the end of the turn. The
//! whole exchange is awaited inside `narrate` and the assembled MP3 buffer
//! is returned directly; nothing touches the filesystem.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use futures::{SinkExt, StreamExt};
use http::header::{ORIGIN, USER_AGENT};
use tokio::time::timeout;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::{NarrationRequest, Narrator};
use crate::types::{AudioData, AudioFormat, NarrationBackend, VoiceInfo};

/// Output format requested from the speech service
const OUTPUT_FORMAT: &str = "audio-24khz-48kbitrate-mono-mp3";

/// Origin expected by the read-aloud endpoint
const EDGE_ORIGIN: &str = "chrome-extension://jdiccldimpdaibmpdkjnbmckianbfold";

const EDGE_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36 Edg/130.0.0.0";

/// Narrator backed by the Edge neural voice service
#[derive(Debug, Clone)]
pub struct EdgeNarrator {
    config: SpeechConfig,
}

impl EdgeNarrator {
    /// Create a new Edge narrator
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid.
    pub fn new(config: SpeechConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;
        Ok(Self { config })
    }

    /// Build the websocket URL with token and connection id
    fn session_url(&self) -> String {
        let connection_id = Uuid::new_v4().simple();
        format!(
            "{}?TrustedClientToken={}&ConnectionId={}",
            self.config.edge_endpoint, self.config.edge_trusted_client_token, connection_id
        )
    }

    /// The service expects a browser-style timestamp header in each frame
    fn timestamp() -> String {
        Utc::now()
            .format("%a %b %d %Y %H:%M:%S GMT+0000 (Coordinated Universal Time)")
            .to_string()
    }

    /// Speech configuration frame sent once per session
    fn config_frame() -> String {
        format!(
            "X-Timestamp:{}\r\nContent-Type:application/json; charset=utf-8\r\nPath:speech.config\r\n\r\n\
             {{\"context\":{{\"synthesis\":{{\"audio\":{{\"metadataoptions\":{{\
             \"sentenceBoundaryEnabled\":\"false\",\"wordBoundaryEnabled\":\"false\"}},\
             \"outputFormat\":\"{OUTPUT_FORMAT}\"}}}}}}}}",
            Self::timestamp()
        )
    }

    /// SSML frame carrying the text to speak
    fn ssml_frame(request_id: &str, voice: &str, text: &str) -> String {
        format!(
            "X-RequestId:{request_id}\r\nContent-Type:application/ssml+xml\r\n\
             X-Timestamp:{}\r\nPath:ssml\r\n\r\n\
             <speak version='1.0' xmlns='http://www.w3.org/2001/10/synthesis' xml:lang='en-US'>\
             <voice name='{voice}'>{}</voice></speak>",
            Self::timestamp(),
            escape_xml(text)
        )
    }

    /// Run the speech session to completion and collect the audio bytes
    async fn run_session(&self, voice: &str, text: &str) -> Result<Vec<u8>, SpeechError> {
        let mut ws_request = self
            .session_url()
            .into_client_request()
            .map_err(|e| SpeechError::Configuration(format!("Invalid endpoint: {e}")))?;
        let headers = ws_request.headers_mut();
        headers.insert(
            ORIGIN,
            EDGE_ORIGIN
                .parse()
                .map_err(|_| SpeechError::Configuration("Invalid origin header".to_string()))?,
        );
        headers.insert(
            USER_AGENT,
            EDGE_USER_AGENT
                .parse()
                .map_err(|_| SpeechError::Configuration("Invalid user agent".to_string()))?,
        );

        let (ws_stream, _) = connect_async(ws_request).await?;
        let (mut write, mut read) = ws_stream.split();

        let request_id = Uuid::new_v4().simple().to_string();

        write.send(Message::Text(Self::config_frame().into())).await?;
        write
            .send(Message::Text(Self::ssml_frame(&request_id, voice, text).into()))
            .await?;

        let mut audio = Vec::new();

        while let Some(frame) = read.next().await {
            match frame? {
                Message::Text(text_frame) => {
                    if text_frame.contains("Path:turn.end") {
                        break;
                    }
                },
                Message::Binary(data) => {
                    if let Some(payload) = audio_payload(&data) {
                        audio.extend_from_slice(payload);
                    }
                },
                Message::Close(_) => break,
                _ => {},
            }
        }

        write.send(Message::Close(None)).await.ok();

        if audio.is_empty() {
            return Err(SpeechError::InvalidResponse(
                "Speech session produced no audio".to_string(),
            ));
        }

        Ok(audio)
    }
}

/// Extract the audio payload from a binary frame
///
/// Frames start with a 2-byte big-endian header length, then the header
/// text, then the payload. Only frames whose header carries `Path:audio`
/// contain audio data.
fn audio_payload(frame: &[u8]) -> Option<&[u8]> {
    if frame.len() < 2 {
        return None;
    }
    let header_len = usize::from(u16::from_be_bytes([frame[0], frame[1]]));
    let body_start = 2 + header_len;
    if frame.len() < body_start {
        return None;
    }
    let header = std::str::from_utf8(&frame[2..body_start]).ok()?;
    if header.contains("Path:audio") {
        Some(&frame[body_start..])
    } else {
        None
    }
}

/// Escape text for embedding in SSML
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\'', "&apos;")
        .replace('"', "&quot;")
}

#[async_trait]
impl Narrator for EdgeNarrator {
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

        let voice = request.voice.as_deref().unwrap_or(&self.config.edge_voice);

        debug!(voice, "Starting Edge speech session");

        let audio = timeout(
            Duration::from_millis(self.config.timeout_ms),
            self.run_session(voice, text),
        )
        .await
        .map_err(|_| SpeechError::Timeout(self.config.timeout_ms))??;

        debug!(audio_size = audio.len(), "Edge speech session complete");

        Ok(AudioData::new(audio, AudioFormat::Mp3))
    }

    async fn list_voices(&self) -> Result<Vec<VoiceInfo>, SpeechError> {
        Ok(vec![
            VoiceInfo::new("en-US-AriaNeural", "Aria")
                .with_languages(vec!["en".to_string()]),
            VoiceInfo::new("en-US-GuyNeural", "Guy").with_languages(vec!["en".to_string()]),
            VoiceInfo::new("en-GB-SoniaNeural", "Sonia")
                .with_languages(vec!["en".to_string()]),
            VoiceInfo::new("vi-VN-HoaiMyNeural", "HoaiMy")
                .with_languages(vec!["vi".to_string()]),
            VoiceInfo::new("vi-VN-NamMinhNeural", "NamMinh")
                .with_languages(vec!["vi".to_string()]),
            VoiceInfo::new("de-DE-KatjaNeural", "Katja")
                .with_languages(vec!["de".to_string()]),
            VoiceInfo::new("fr-FR-DeniseNeural", "Denise")
                .with_languages(vec!["fr".to_string()]),
            VoiceInfo::new("ja-JP-NanamiNeural", "Nanami")
                .with_languages(vec!["ja".to_string()]),
        ])
    }

    fn backend(&self) -> NarrationBackend {
        NarrationBackend::Edge
    }

    fn default_voice(&self) -> &str {
        &self.config.edge_voice
    }
}
