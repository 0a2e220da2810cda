//! Reading service - the extract-then-narrate pipeline
//!
//! Composes the credential resolver, the vision extraction adapter, the
//! session text store and the narration adapter. Extraction overwrites the
//! session text; narration reads it on demand. There is no retry anywhere;
//! a retry is the user re-submitting.

use std::fmt;
use std::sync::Arc;

use domain::{ImagePayload, SessionId};
use tracing::{debug, instrument};

use crate::error::ApplicationError;
use crate::ports::{NarrationPort, NarrationResult, NarrationTask, VisionPort, VoiceCatalogEntry};
use crate::ports::narration_port::NarrationBackend;
use crate::services::credential_resolver::{CredentialResolver, Provider};
use crate::services::session_store::SessionRegistry;

/// Service driving the extract-then-narrate pipeline
pub struct ReadingService {
    vision: Arc<dyn VisionPort>,
    narration: Arc<dyn NarrationPort>,
    resolver: Arc<CredentialResolver>,
    sessions: Arc<SessionRegistry>,
}

impl fmt::Debug for ReadingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadingService")
            .field("live_sessions", &self.sessions.len())
            .finish_non_exhaustive()
    }
}

impl ReadingService {
    /// Create a new reading service
    pub fn new(
        vision: Arc<dyn VisionPort>,
        narration: Arc<dyn NarrationPort>,
        resolver: Arc<CredentialResolver>,
        sessions: Arc<SessionRegistry>,
    ) -> Self {
        Self {
            vision,
            narration,
            resolver,
            sessions,
        }
    }

    /// Extract text from an image and overwrite the session's text slot
    ///
    /// Returns the extracted text. On any failure the session text is left
    /// untouched.
    #[instrument(skip(self, image, override_key), fields(session_id = %session, image_size = image.size_bytes()))]
    pub async fn extract_to_session(
        &self,
        session: SessionId,
        image: &ImagePayload,
        override_key: Option<&str>,
    ) -> Result<String, ApplicationError> {
        let credential = self.resolver.require(Provider::Google, override_key).await?;

        let text = self.vision.extract_text(image, &credential).await?;

        self.sessions.set_text(session, text.clone());
        debug!(text_len = text.len(), "Extraction result stored in session");

        Ok(text)
    }

    /// Narrate the session's current text with the chosen backend
    #[instrument(skip(self, override_key), fields(session_id = %session, backend = %backend))]
    pub async fn narrate_session(
        &self,
        session: SessionId,
        backend: NarrationBackend,
        voice: Option<String>,
        override_key: Option<&str>,
    ) -> Result<NarrationResult, ApplicationError> {
        let text = self.sessions.text(session);
        self.narrate(&text, backend, voice, override_key).await
    }

    /// Narrate arbitrary text with the chosen backend
    ///
    /// Empty text is a user-input condition, rejected here before the
    /// adapter is invoked; credential resolution happens only for backends
    /// that need one.
    pub async fn narrate(
        &self,
        text: &str,
        backend: NarrationBackend,
        voice: Option<String>,
        override_key: Option<&str>,
    ) -> Result<NarrationResult, ApplicationError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ApplicationError::EmptyInput(
                "There is no text to read aloud; extract or enter some first".to_string(),
            ));
        }

        let credential = if backend.requires_credential() {
            Some(
                self.resolver
                    .require(Provider::ElevenLabs, override_key)
                    .await?,
            )
        } else {
            None
        };

        self.narration
            .narrate(NarrationTask {
                text: trimmed.to_string(),
                backend,
                voice,
                credential,
            })
            .await
    }

    /// List every voice across the configured backends
    pub async fn list_voices(&self) -> Result<Vec<VoiceCatalogEntry>, ApplicationError> {
        self.narration.list_voices().await
    }

    /// Read the session's current text
    pub fn session_text(&self, session: SessionId) -> String {
        self.sessions.text(session)
    }

    /// Directly overwrite the session's text (user edit)
    pub fn set_session_text(&self, session: SessionId, text: impl Into<String>) {
        self.sessions.set_text(session, text);
    }

    /// End a session, dropping its text
    pub fn end_session(&self, session: SessionId) -> bool {
        self.sessions.end(session)
    }
}
