//! Application state shared across handlers

use std::sync::Arc;

use application::{ChatService, ReadingService};
use infrastructure::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Chat service for conversation handling
    pub chat_service: Arc<ChatService>,
    /// Reading service for the extract-then-narrate pipeline
    pub reading_service: Arc<ReadingService>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}
