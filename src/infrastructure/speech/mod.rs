mod google_translate_tts;
mod openai_speech_synthesizer;
mod synthesizer_factory;

pub use google_translate_tts::{GoogleTranslateSynthesizer, MAX_PIECE_CHARS, split_text, voice_language};
pub use openai_speech_synthesizer::OpenAiSpeechSynthesizer;
pub use synthesizer_factory::{SynthesisProvider, SynthesizerFactory};
