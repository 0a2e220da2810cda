//! Narration provider implementations
//!
//! Contains concrete implementations of the `Narrator` trait.

pub mod edge;
pub mod elevenlabs;
pub mod translate;

pub use edge::EdgeNarrator;
pub use elevenlabs::ElevenLabsNarrator;
pub use translate::GoogleTranslateNarrator;
