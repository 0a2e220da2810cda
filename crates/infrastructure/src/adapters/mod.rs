//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod env_secret_store;
mod gemini_inference_adapter;
mod narration_adapter;

pub use env_secret_store::EnvSecretStore;
pub use gemini_inference_adapter::GeminiInferenceAdapter;
pub use narration_adapter::NarrationAdapter;
