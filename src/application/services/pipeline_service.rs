use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::ports::AudioStoreError;
use crate::domain::{
    AudioBlob, AudioName, LanguageCode, LanguagePair, ReconfigurePolicy, SessionId,
    TranscriptionResult, TranslationArtifact,
};

use super::audio_normalizer::AudioNormalizer;
use super::model_registry::{LoadOutcome, ModelRegistry};
use super::pipeline_error::PipelineError;
use super::session_store::SessionStore;
use super::synthesis_stage::SynthesisStage;
use super::transcription_stage::TranscriptionStage;
use super::translation_stage::TranslationStage;

#[derive(Debug, Clone)]
pub struct ConfigureOutcome {
    pub pair: LanguagePair,
    pub model_id: String,
    pub reloaded: bool,
    pub transcript_retained: bool,
}

#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub id: SessionId,
    pub state: &'static str,
    pub pair: Option<LanguagePair>,
    pub transcript: Option<TranscriptionResult>,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

pub struct PipelineService {
    sessions: Arc<SessionStore>,
    registry: Arc<ModelRegistry>,
    normalizer: AudioNormalizer,
    transcription: TranscriptionStage,
    translation: TranslationStage,
    synthesis: SynthesisStage,
    reconfigure_policy: ReconfigurePolicy,
}

impl PipelineService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sessions: Arc<SessionStore>,
        registry: Arc<ModelRegistry>,
        normalizer: AudioNormalizer,
        transcription: TranscriptionStage,
        translation: TranslationStage,
        synthesis: SynthesisStage,
        reconfigure_policy: ReconfigurePolicy,
    ) -> Self {
        Self {
            sessions,
            registry,
            normalizer,
            transcription,
            translation,
            synthesis,
            reconfigure_policy,
        }
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    pub fn registry(&self) -> &Arc<ModelRegistry> {
        &self.registry
    }

    pub async fn preload_default(&self) -> Result<Option<LoadOutcome>, PipelineError> {
        match self.sessions.default_pair() {
            Some(pair) => Ok(Some(self.registry.ensure_loaded(pair).await?)),
            None => Ok(None),
        }
    }

    pub async fn configure(
        &self,
        id: SessionId,
        pair: LanguagePair,
    ) -> Result<ConfigureOutcome, PipelineError> {
        let session = self.sessions.get_or_create(id).await;
        let mut session = session.lock().await;

        // A failed load leaves both the registry and the session as they were.
        let loaded = self.registry.ensure_loaded(&pair).await?;
        let transcript_retained = session.configure(pair.clone(), self.reconfigure_policy);

        tracing::info!(
            session_id = %id,
            pair = %pair,
            reloaded = loaded.reloaded,
            transcript_retained,
            "Session configured"
        );

        Ok(ConfigureOutcome {
            pair,
            model_id: loaded.model.handle.model_id().to_string(),
            reloaded: loaded.reloaded,
            transcript_retained,
        })
    }

    pub async fn record(
        &self,
        id: SessionId,
        blob: AudioBlob,
    ) -> Result<TranscriptionResult, PipelineError> {
        let session = self.sessions.get_or_create(id).await;
        let mut session = session.lock().await;

        let pair = session.active_pair()?;

        match self.recognize(&blob, pair.source()).await {
            Ok(transcript) => {
                session.record_succeeded(transcript.clone())?;
                Ok(transcript)
            }
            Err(e) => {
                session.record_failed();
                tracing::warn!(session_id = %id, error = %e, code = e.code(), "Recording failed");
                Err(e)
            }
        }
    }

    pub async fn translate(&self, id: SessionId) -> Result<TranslationArtifact, PipelineError> {
        let session = self.sessions.get_or_create(id).await;
        let mut session = session.lock().await;

        let (pair, transcript) = session.pending_translation()?;

        // On failure the transcript stays pending so the client can retry.
        let translated_text = self.translation.translate(&transcript.text, &pair).await?;
        let audio = self.synthesis.render(&translated_text, pair.target()).await;
        session.touch();

        let artifact = TranslationArtifact {
            original: transcript,
            translated_text,
            target_language: pair.target().clone(),
            audio,
        };

        tracing::info!(
            session_id = %id,
            pair = %pair,
            partial = artifact.is_partial(),
            "Translation completed"
        );

        Ok(artifact)
    }

    pub async fn fetch_audio(&self, raw_name: &str) -> Result<(AudioName, Vec<u8>), PipelineError> {
        let name =
            AudioName::parse(raw_name).map_err(|_| PipelineError::AudioNotFound(raw_name.to_string()))?;

        match self.synthesis.fetch(&name).await {
            Ok(content) => Ok((name, content)),
            Err(AudioStoreError::NotFound(_)) => Err(PipelineError::AudioNotFound(name.to_string())),
            Err(e) => Err(PipelineError::Internal(e.to_string())),
        }
    }

    pub async fn snapshot(&self, id: SessionId) -> SessionSnapshot {
        let session = self.sessions.get_or_create(id).await;
        let session = session.lock().await;
        SessionSnapshot {
            id,
            state: session.state().name(),
            pair: session.state().pair().cloned(),
            transcript: session.state().transcript().cloned(),
            created_at: session.created_at(),
            last_activity: session.last_activity(),
        }
    }

    pub async fn reset(&self, id: SessionId) -> SessionSnapshot {
        if let Some(session) = self.sessions.get(id).await {
            session
                .lock()
                .await
                .reset(self.sessions.default_pair().cloned());
        }
        self.snapshot(id).await
    }

    async fn recognize(
        &self,
        blob: &AudioBlob,
        language: &LanguageCode,
    ) -> Result<TranscriptionResult, PipelineError> {
        let audio = self.normalizer.normalize(blob).await?;
        Ok(self.transcription.transcribe(&audio, language).await?)
    }
}
