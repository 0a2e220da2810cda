//! Types for narration
//!
//! Contains data structures for audio payloads, formats, backend selection
//! and voice information.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Narration backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrationBackend {
    /// Google Translate voice (free, language-code selector)
    Translate,
    /// Microsoft Edge neural voices
    Edge,
    /// ElevenLabs premium voices
    ElevenLabs,
}

impl NarrationBackend {
    /// Whether this backend requires a credential
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

impl FromStr for NarrationBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "translate" => Ok(Self::Translate),
            "edge" => Ok(Self::Edge),
            "elevenlabs" => Ok(Self::ElevenLabs),
            _ => Err(format!(
                "Unknown narration backend: {s}. Use 'translate', 'edge' or 'elevenlabs'"
            )),
        }
    }
}

/// Supported audio formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// MP3 format (what all three backends return)
    Mp3,
    /// WAV format (uncompressed)
    Wav,
    /// OGG container
    Ogg,
    /// WebM format
    Webm,
}

impl AudioFormat {
    /// Get the MIME type for this audio format
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
            Self::Ogg => "audio/ogg",
            Self::Webm => "audio/webm",
        }
    }

    /// Get the file extension for this audio format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Ogg => "ogg",
            Self::Webm => "webm",
        }
    }

    /// Parse audio format from MIME type
    #[must_use]
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        let base_mime = mime.split(';').next().unwrap_or(mime).trim();

        match base_mime {
            "audio/mpeg" | "audio/mp3" => Some(Self::Mp3),
            "audio/wav" | "audio/x-wav" | "audio/wave" => Some(Self::Wav),
            "audio/ogg" => Some(Self::Ogg),
            "audio/webm" => Some(Self::Webm),
            _ => None,
        }
    }
}

/// Container for synthesized audio with metadata
#[derive(Debug, Clone)]
pub struct AudioData {
    /// Raw audio bytes
    data: Vec<u8>,
    /// Audio format
    format: AudioFormat,
}

impl AudioData {
    /// Create new audio data
    #[must_use]
    pub const fn new(data: Vec<u8>, format: AudioFormat) -> Self {
        Self { data, format }
    }

    /// Get the raw audio bytes
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the raw audio bytes
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Get the audio format
    #[must_use]
    pub const fn format(&self) -> AudioFormat {
        self.format
    }

    /// Get the size of the audio data in bytes
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Check if the audio data is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the MIME type for this audio
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Information about an available voice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceInfo {
    /// Voice identifier (language code, neural voice name, or voice id)
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Description of the voice
    pub description: Option<String>,
    /// Supported languages
    pub languages: Vec<String>,
}

impl VoiceInfo {
    /// Create a new voice info
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            languages: Vec::new(),
        }
    }

    /// Set the supported languages
    #[must_use]
    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.languages = languages;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod narration_backend {
        use super::*;

        #[test]
        fn parses_from_str() {
            assert_eq!(
                "translate".parse::<NarrationBackend>().unwrap(),
                NarrationBackend::Translate
            );
            assert_eq!(
                "edge".parse::<NarrationBackend>().unwrap(),
                NarrationBackend::Edge
            );
            assert_eq!(
                "elevenlabs".parse::<NarrationBackend>().unwrap(),
                NarrationBackend::ElevenLabs
            );
        }

        #[test]
        fn parse_is_case_insensitive() {
            assert_eq!(
                "ElevenLabs".parse::<NarrationBackend>().unwrap(),
                NarrationBackend::ElevenLabs
            );
        }

        #[test]
        fn parse_unknown_fails() {
            assert!("polly".parse::<NarrationBackend>().is_err());
        }

        #[test]
        fn display_roundtrips() {
            for backend in [
                NarrationBackend::Translate,
                NarrationBackend::Edge,
                NarrationBackend::ElevenLabs,
            ] {
                let parsed = backend.to_string().parse::<NarrationBackend>().unwrap();
                assert_eq!(parsed, backend);
            }
        }

        #[test]
        fn serializes_lowercase() {
            let json = serde_json::to_string(&NarrationBackend::ElevenLabs).unwrap();
            assert_eq!(json, "\"elevenlabs\"");
        }

        #[test]
        fn only_elevenlabs_requires_credential() {
            assert!(!NarrationBackend::Translate.requires_credential());
            assert!(!NarrationBackend::Edge.requires_credential());
            assert!(NarrationBackend::ElevenLabs.requires_credential());
        }
    }

    mod audio_format {
        use super::*;

        #[test]
        fn mime_types_are_correct() {
            assert_eq!(AudioFormat::Mp3.mime_type(), "audio/mpeg");
            assert_eq!(AudioFormat::Wav.mime_type(), "audio/wav");
            assert_eq!(AudioFormat::Ogg.mime_type(), "audio/ogg");
            assert_eq!(AudioFormat::Webm.mime_type(), "audio/webm");
        }

        #[test]
        fn extensions_are_correct() {
            assert_eq!(AudioFormat::Mp3.extension(), "mp3");
            assert_eq!(AudioFormat::Wav.extension(), "wav");
        }

        #[test]
        fn from_mime_type_simple() {
            assert_eq!(AudioFormat::from_mime_type("audio/mpeg"), Some(AudioFormat::Mp3));
            assert_eq!(AudioFormat::from_mime_type("audio/mp3"), Some(AudioFormat::Mp3));
            assert_eq!(AudioFormat::from_mime_type("audio/x-wav"), Some(AudioFormat::Wav));
        }

        #[test]
        fn from_mime_type_with_parameters() {
            assert_eq!(
                AudioFormat::from_mime_type("audio/mpeg; charset=binary"),
                Some(AudioFormat::Mp3)
            );
        }

        #[test]
        fn from_mime_type_unknown() {
            assert_eq!(AudioFormat::from_mime_type("text/plain"), None);
        }
    }

    mod audio_data {
        use super::*;

        #[test]
        fn new_creates_audio_data() {
            let data = vec![1, 2, 3, 4];
            let audio = AudioData::new(data.clone(), AudioFormat::Mp3);

            assert_eq!(audio.data(), &data);
            assert_eq!(audio.format(), AudioFormat::Mp3);
            assert_eq!(audio.size_bytes(), 4);
        }

        #[test]
        fn is_empty_reflects_contents() {
            assert!(AudioData::new(vec![], AudioFormat::Mp3).is_empty());
            assert!(!AudioData::new(vec![1], AudioFormat::Mp3).is_empty());
        }

        #[test]
        fn into_data_consumes_and_returns_bytes() {
            let original = vec![1, 2, 3, 4, 5];
            let audio = AudioData::new(original.clone(), AudioFormat::Mp3);
            assert_eq!(audio.into_data(), original);
        }

        #[test]
        fn mime_type_delegates_to_format() {
            let audio = AudioData::new(vec![], AudioFormat::Mp3);
            assert_eq!(audio.mime_type(), "audio/mpeg");
        }
    }

    mod voice_info {
        use super::*;

        #[test]
        fn new_creates_voice_info() {
            let voice = VoiceInfo::new("vi", "Vietnamese");
            assert_eq!(voice.id, "vi");
            assert_eq!(voice.name, "Vietnamese");
            assert!(voice.description.is_none());
            assert!(voice.languages.is_empty());
        }

        #[test]
        fn with_languages_sets_languages() {
            let voice = VoiceInfo::new("vi-VN-HoaiMyNeural", "HoaiMy")
                .with_languages(vec!["vi".to_string()]);
            assert_eq!(voice.languages, vec!["vi".to_string()]);
        }
    }
}
