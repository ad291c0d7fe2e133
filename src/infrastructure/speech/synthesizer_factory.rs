use std::sync::Arc;

use serde::Deserialize;

use crate::application::ports::SpeechSynthesizer;

use super::google_translate_tts::GoogleTranslateSynthesizer;
use super::openai_speech_synthesizer::OpenAiSpeechSynthesizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisProvider {
    Google,
    #[serde(rename = "openai")]
    OpenAi,
}

pub struct SynthesizerFactory;

impl SynthesizerFactory {
    pub fn create(
        provider: SynthesisProvider,
        base_url: Option<String>,
        api_key: Option<String>,
        model: Option<String>,
        voice: Option<String>,
    ) -> Arc<dyn SpeechSynthesizer> {
        match provider {
            SynthesisProvider::Google => Arc::new(GoogleTranslateSynthesizer::new(base_url)),
            SynthesisProvider::OpenAi => Arc::new(OpenAiSpeechSynthesizer::new(
                api_key.unwrap_or_default(),
                base_url,
                model,
                voice,
            )),
        }
    }
}
