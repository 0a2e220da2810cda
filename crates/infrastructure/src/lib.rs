//! Infrastructure layer - Adapters for external systems
//!
//! Implements the ports defined in the application layer: the environment
//! secret store, the Gemini inference/vision adapter and the narration
//! adapter, plus application configuration loading.

pub mod adapters;
pub mod config;

pub use adapters::{EnvSecretStore, GeminiInferenceAdapter, NarrationAdapter};
pub use config::{AppConfig, ServerConfig};
