//! Session text store
//!
//! Each session owns exactly one mutable text slot: the current
//! extracted/edited text. Writes replace the slot wholesale
//! (last-write-wins, never merged). Sessions are created on first touch
//! and removed by an explicit end-session call.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use domain::SessionId;
use parking_lot::RwLock;
use tracing::debug;

/// The single text slot of one session
#[derive(Debug, Clone)]
struct SessionContext {
    text: String,
    updated_at: DateTime<Utc>,
}

impl SessionContext {
    fn new() -> Self {
        Self {
            text: String::new(),
            updated_at: Utc::now(),
        }
    }
}

/// Registry mapping session ids to their text slot
///
/// Handlers serialize writes through the registry lock; within a session
/// one user action runs to completion before the next.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, SessionContext>>,
}

impl SessionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the session's current text, creating the session on first touch
    pub fn text(&self, id: SessionId) -> String {
        let mut sessions = self.sessions.write();
        sessions.entry(id).or_insert_with(SessionContext::new).text.clone()
    }

    /// Overwrite the session's text wholesale, creating the session on first touch
    pub fn set_text(&self, id: SessionId, text: impl Into<String>) {
        let mut sessions = self.sessions.write();
        let context = sessions.entry(id).or_insert_with(SessionContext::new);
        context.text = text.into();
        context.updated_at = Utc::now();
        debug!(session_id = %id, "Session text replaced");
    }

    /// When the session's text was last written, if the session exists
    pub fn updated_at(&self, id: SessionId) -> Option<DateTime<Utc>> {
        self.sessions.read().get(&id).map(|c| c.updated_at)
    }

    /// End a session, dropping its text
    ///
    /// Returns whether the session existed.
    pub fn end(&self, id: SessionId) -> bool {
        let removed = self.sessions.write().remove(&id).is_some();
        if removed {
            debug!(session_id = %id, "Session ended");
        }
        removed
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Whether there are no live sessions
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}
