//! Application layer for VoxPage
//!
//! Orchestrates the extract-then-narrate pipeline: credential resolution,
//! the per-session text slot, vision extraction and narration. Depends only
//! on the domain layer and its own ports; concrete adapters live in the
//! infrastructure crate.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use services::{
    ChatService, Credential, CredentialResolver, Provider, ReadingService, Resolution,
    SessionRegistry,
};
