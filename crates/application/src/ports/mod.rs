//! Application ports
//!
//! Interfaces the application layer expects the infrastructure layer to
//! implement.

pub mod narration_port;
pub mod secret_store;
pub mod vision_port;

pub use narration_port::{
    NarrationBackend, NarrationPort, NarrationResult, NarrationTask, VoiceCatalogEntry,
};
pub use secret_store::SecretStorePort;
pub use vision_port::{InferencePort, InferenceResult, ModelEntry, VisionPort};
