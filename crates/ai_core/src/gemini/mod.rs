//! Gemini REST adapter

mod client;

pub use client::GeminiClient;
