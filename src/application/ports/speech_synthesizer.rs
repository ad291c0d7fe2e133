use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::{AudioFormat, LanguageCode};

#[derive(Debug, Clone)]
pub struct SynthesizedSpeech {
    pub content: Bytes,
    pub format: AudioFormat,
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(
        &self,
        text: &str,
        language: &LanguageCode,
    ) -> Result<SynthesizedSpeech, SynthesisError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("synthesizer returned no audio")]
    EmptyAudio,
    #[error("nothing to synthesize")]
    EmptyText,
}
