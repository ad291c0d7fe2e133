mod audio_store;
mod audio_transcoder;
mod speech_synthesizer;
mod transcription_engine;
mod translation_model;

pub use audio_store::{AudioStore, AudioStoreError};
pub use audio_transcoder::{AudioTranscoder, TranscodeError};
pub use speech_synthesizer::{SpeechSynthesizer, SynthesisError, SynthesizedSpeech};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
pub use translation_model::{
    ModelLoadError, TranslationModel, TranslationModelError, TranslationModelLoader,
};
