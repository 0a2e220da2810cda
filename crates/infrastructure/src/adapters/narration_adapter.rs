//! Narration adapter - Implements NarrationPort using ai_speech
//!
//! Holds one narrator per backend and dispatches on the task's backend
//! selector; new backends are added as new variants, not new conditionals
//! in the services.

use ai_speech::{
    EdgeNarrator, ElevenLabsNarrator, GoogleTranslateNarrator, NarrationRequest, Narrator,
    SpeechConfig, SpeechError,
};
use application::{
    error::ApplicationError,
    ports::{NarrationBackend, NarrationPort, NarrationResult, NarrationTask, VoiceCatalogEntry},
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Adapter over the three narration backends
#[derive(Debug)]
pub struct NarrationAdapter {
    translate: GoogleTranslateNarrator,
    edge: EdgeNarrator,
    elevenlabs: ElevenLabsNarrator,
}

impl NarrationAdapter {
    /// Create a new adapter with the given configuration
    pub fn new(config: SpeechConfig) -> Result<Self, ApplicationError> {
        let translate = GoogleTranslateNarrator::new(config.clone())
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        let edge = EdgeNarrator::new(config.clone())
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        let elevenlabs = ElevenLabsNarrator::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;

        Ok(Self {
            translate,
            edge,
            elevenlabs,
        })
    }

    /// Pick the narrator for a backend selector
    fn narrator_for(&self, backend: NarrationBackend) -> &dyn Narrator {
        match backend {
            NarrationBackend::Translate => &self.translate,
            NarrationBackend::Edge => &self.edge,
            NarrationBackend::ElevenLabs => &self.elevenlabs,
        }
    }

    /// Convert ai_speech error to application error
    fn map_error(e: SpeechError) -> ApplicationError {
        match e {
            SpeechError::MissingCredential(provider) => ApplicationError::ConfigurationMissing(
                format!("No API key available for {provider}"),
            ),
            SpeechError::Unauthorized(msg) => ApplicationError::NotAuthorized(msg),
            SpeechError::RateLimited => ApplicationError::RateLimited,
            SpeechError::EmptyInput => ApplicationError::EmptyInput(
                "There is no text to read aloud".to_string(),
            ),
            SpeechError::VoiceNotFound(voice) => {
                ApplicationError::InvalidInput(format!("Unknown voice: {voice}"))
            },
            SpeechError::ConnectionFailed(msg) => {
                ApplicationError::Network(format!("Speech service unreachable: {msg}"))
            },
            SpeechError::Timeout(ms) => {
                ApplicationError::Network(format!("Speech synthesis timed out after {ms}ms"))
            },
            other => ApplicationError::ExternalService(other.to_string()),
        }
    }
}

#[async_trait]
impl NarrationPort for NarrationAdapter {
    #[instrument(skip(self, task), fields(backend = %task.backend, text_len = task.text.len()))]
    async fn narrate(&self, task: NarrationTask) -> Result<NarrationResult, ApplicationError> {
        let narrator = self.narrator_for(task.backend);

        let mut request = NarrationRequest::new(task.text);
        if let Some(voice) = task.voice {
            request = request.with_voice(voice);
        }
        if let Some(credential) = task.credential {
            request = request.with_credential(credential.expose());
        }

        let audio = narrator
            .narrate(&request)
            .await
            .map_err(Self::map_error)?;

        debug!(audio_size = audio.size_bytes(), "Narration completed");

        Ok(NarrationResult {
            mime_type: audio.mime_type().to_string(),
            audio: audio.into_data(),
        })
    }

    async fn list_voices(&self) -> Result<Vec<VoiceCatalogEntry>, ApplicationError> {
        let mut catalog = Vec::new();

        for backend in [
            NarrationBackend::Translate,
            NarrationBackend::Edge,
            NarrationBackend::ElevenLabs,
        ] {
            let voices = self
                .narrator_for(backend)
                .list_voices()
                .await
                .map_err(Self::map_error)?;

            catalog.extend(voices.into_iter().map(|v| VoiceCatalogEntry {
                backend,
                id: v.id,
                name: v.name,
                languages: v.languages,
            }));
        }

        Ok(catalog)
    }
}
