use std::sync::Arc;

use serde::Deserialize;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

use super::candle_whisper_engine::CandleWhisperEngine;
use super::openai_whisper_engine::OpenAiWhisperEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptionProvider {
    Local,
    #[serde(rename = "openai")]
    OpenAi,
}

pub struct TranscriptionEngineFactory;

impl TranscriptionEngineFactory {
    pub fn create(
        provider: TranscriptionProvider,
        model: &str,
        api_key: Option<String>,
        base_url: Option<String>,
    ) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> {
        match provider {
            TranscriptionProvider::Local => {
                let engine = CandleWhisperEngine::new(model)?;
                Ok(Arc::new(engine))
            }
            TranscriptionProvider::OpenAi => {
                // Self-hosted OpenAI-compatible servers often run without a key.
                if api_key.is_none() && base_url.is_none() {
                    return Err(TranscriptionError::ModelLoadFailed(
                        "API key required for the hosted Whisper API".to_string(),
                    ));
                }
                let engine = OpenAiWhisperEngine::new(
                    api_key.unwrap_or_default(),
                    base_url,
                    Some(model.to_string()),
                );
                Ok(Arc::new(engine))
            }
        }
    }
}
