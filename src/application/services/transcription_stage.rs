use std::sync::Arc;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::{LanguageCode, NormalizedAudio, TranscriptionResult};

pub struct TranscriptionStage {
    engine: Arc<dyn TranscriptionEngine>,
}

impl TranscriptionStage {
    pub fn new(engine: Arc<dyn TranscriptionEngine>) -> Self {
        Self { engine }
    }

    pub async fn transcribe(
        &self,
        audio: &NormalizedAudio,
        language: &LanguageCode,
    ) -> Result<TranscriptionResult, TranscriptionError> {
        let text = self.engine.transcribe(audio, language).await?;
        let text = text.trim();

        if text.is_empty() {
            return Err(TranscriptionError::NoSpeechDetected);
        }

        tracing::info!(
            language = %language,
            chars = text.chars().count(),
            duration_secs = audio.duration_secs(),
            "Speech recognized"
        );

        Ok(TranscriptionResult::new(text, language.clone()))
    }
}
