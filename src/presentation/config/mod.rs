mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AudioSettings, LoggingSettings, PipelineSettings, ServerSettings, Settings, StorageSettings,
    SynthesisSettings, TranscriptionSettings, TranslationSettings,
};
