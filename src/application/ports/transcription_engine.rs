use async_trait::async_trait;

use crate::domain::{LanguageCode, NormalizedAudio};

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(
        &self,
        audio: &NormalizedAudio,
        language: &LanguageCode,
    ) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("no speech detected")]
    NoSpeechDetected,
    #[error("recognition service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
}
