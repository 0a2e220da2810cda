//! AI Speech - Narration abstractions
//!
//! Provides the `Narrator` trait and the concrete narration backends:
//! - Google Translate voice (free, language-code selector)
//! - Microsoft Edge neural voices (websocket speech session)
//! - ElevenLabs (premium, credential required)
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the trait (port) and the request type
//! - `providers` module contains concrete implementations (adapters)
//!
//! # Example
//!
//! ```ignore
//! use ai_speech::{GoogleTranslateNarrator, Narrator, NarrationRequest, SpeechConfig};
//!
//! let narrator = GoogleTranslateNarrator::new(SpeechConfig::default())?;
//! let audio = narrator.narrate(&NarrationRequest::new("Xin chào").with_voice("vi")).await?;
//! assert_eq!(audio.mime_type(), "audio/mpeg");
//! ```

pub mod config;
pub mod error;
pub mod ports;
pub mod providers;
pub mod types;

pub use config::SpeechConfig;
pub use error::SpeechError;
pub use ports::{NarrationRequest, Narrator};
pub use providers::edge::EdgeNarrator;
pub use providers::elevenlabs::ElevenLabsNarrator;
pub use providers::translate::GoogleTranslateNarrator;
pub use types::{AudioData, AudioFormat, NarrationBackend, VoiceInfo};
