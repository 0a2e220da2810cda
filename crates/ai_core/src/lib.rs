//! AI Core - Generative model client
//!
//! Provides the abstraction over the hosted generative-AI endpoint used for
//! chat, vision text extraction and the model catalog.
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the trait (port) and request/response types
//! - `gemini` module contains the Gemini REST adapter

pub mod config;
pub mod error;
pub mod gemini;
pub mod ports;

pub use config::InferenceConfig;
pub use error::InferenceError;
pub use gemini::GeminiClient;
pub use ports::{GenerationRequest, GenerationResponse, GenerativeModel, ModelInfo, TokenUsage};
