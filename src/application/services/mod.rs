mod audio_normalizer;
mod model_registry;
mod pipeline_error;
mod pipeline_service;
mod session_store;
mod synthesis_stage;
mod transcription_stage;
mod translation_stage;

pub use audio_normalizer::{
    AudioNormalizer, DEFAULT_UPLOAD_EXTENSION, NormalizationError, extension_for_mime,
};
pub use model_registry::{ActiveModel, LoadOutcome, LoadPolicy, ModelRegistry, ModelRegistryError};
pub use pipeline_error::{ErrorKind, PipelineError};
pub use pipeline_service::{ConfigureOutcome, PipelineService, SessionSnapshot};
pub use session_store::SessionStore;
pub use synthesis_stage::SynthesisStage;
pub use transcription_stage::TranscriptionStage;
pub use translation_stage::TranslationStage;
