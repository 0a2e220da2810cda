//! Narration errors

use thiserror::Error;

/// Errors that can occur during speech synthesis
#[derive(Debug, Error)]
pub enum SpeechError {
    /// No credential available for a backend that requires one
    #[error("Missing credential for {0}")]
    MissingCredential(String),

    /// The credential was rejected by the service
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Rate limit or quota exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Input text was empty after trimming
    #[error("Input text is empty")]
    EmptyInput,

    /// Failed to connect to the speech service
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the speech service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Invalid response from the service
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Timeout during synthesis
    #[error("Speech synthesis timeout after {0}ms")]
    Timeout(u64),

    /// Synthesis failed
    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),

    /// Voice not found
    #[error("Voice not found: {0}")]
    VoiceNotFound(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for SpeechError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(30000)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for SpeechError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        use tokio_tungstenite::tungstenite::Error as WsError;
        match err {
            WsError::Io(e) => Self::ConnectionFailed(e.to_string()),
            WsError::ConnectionClosed | WsError::AlreadyClosed => {
                Self::ConnectionFailed("speech session closed".to_string())
            },
            other => Self::RequestFailed(other.to_string()),
        }
    }
}
