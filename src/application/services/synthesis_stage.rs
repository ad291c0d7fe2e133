use std::sync::Arc;

use crate::application::ports::{AudioStore, AudioStoreError, SpeechSynthesizer, SynthesisError};
use crate::domain::{AudioArtifact, AudioName, AudioOutcome, LanguageCode};

pub struct SynthesisStage {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    store: Arc<dyn AudioStore>,
    public_prefix: String,
}

impl SynthesisStage {
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizer>,
        store: Arc<dyn AudioStore>,
        public_prefix: impl Into<String>,
    ) -> Self {
        Self {
            synthesizer,
            store,
            public_prefix: public_prefix.into(),
        }
    }

    pub async fn synthesize(
        &self,
        text: &str,
        language: &LanguageCode,
    ) -> Result<AudioArtifact, SynthesisError> {
        if text.trim().is_empty() {
            return Err(SynthesisError::EmptyText);
        }

        let speech = self.synthesizer.synthesize(text, language).await?;
        if speech.content.is_empty() {
            return Err(SynthesisError::EmptyAudio);
        }

        Ok(AudioArtifact {
            name: AudioName::derive(text, language, speech.format),
            content: speech.content,
        })
    }

    pub async fn publish(&self, artifact: AudioArtifact) -> Result<String, AudioStoreError> {
        let size = self.store.store(&artifact.name, artifact.content).await?;
        tracing::debug!(name = %artifact.name, bytes = size, "Synthesized audio stored");
        Ok(self.url_for(&artifact.name))
    }

    pub async fn render(&self, text: &str, language: &LanguageCode) -> AudioOutcome {
        let artifact = match self.synthesize(text, language).await {
            Ok(artifact) => artifact,
            Err(e) => {
                tracing::warn!(error = %e, language = %language, "Speech synthesis failed");
                return AudioOutcome::Failed {
                    reason: format!("synthesis failed: {}", e),
                };
            }
        };

        let name = artifact.name.clone();
        match self.publish(artifact).await {
            Ok(url) => AudioOutcome::Stored { name, url },
            Err(e) => {
                tracing::warn!(error = %e, name = %name, "Storing synthesized audio failed");
                AudioOutcome::Failed {
                    reason: format!("storage failed: {}", e),
                }
            }
        }
    }

    pub async fn fetch(&self, name: &AudioName) -> Result<Vec<u8>, AudioStoreError> {
        self.store.fetch(name).await
    }

    pub fn url_for(&self, name: &AudioName) -> String {
        format!("{}/{}", self.public_prefix.trim_end_matches('/'), name)
    }
}
