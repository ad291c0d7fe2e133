use crate::application::ports::{TranscodeError, TranscriptionError};
use crate::domain::{LanguagePairError, SessionError};

use super::audio_normalizer::NormalizationError;
use super::model_registry::ModelRegistryError;

/// Failure taxonomy shared by every pipeline operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or unusable input from the client; retrying unchanged will not help.
    ClientInput,
    /// A backend failed; the caller may retry.
    TransientBackend,
    /// Model load failed or translate ran without a loaded model; reconfigure.
    ModelState,
    /// The call came out of sequence (nothing recorded or configured yet).
    NoInputAvailable,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClientInput => "client_input",
            Self::TransientBackend => "transient_backend",
            Self::ModelState => "model_state",
            Self::NoInputAvailable => "no_input_available",
            Self::Internal => "internal",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("session has no language pair configured")]
    SessionNotConfigured,
    #[error("invalid language selection: {0}")]
    InvalidLanguage(String),
    #[error("no audio provided")]
    NoAudioProvided,
    #[error("could not decode uploaded audio: {0}")]
    TranscodeFailed(String),
    #[error("no speech detected in the recording")]
    NoSpeechDetected,
    #[error("speech recognition service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("no translation model available for {pair}: {reason}")]
    ModelUnavailable { pair: String, reason: String },
    #[error("translation model for {requested} is not loaded (active: {})", .active.as_deref().unwrap_or("none"))]
    ModelNotReady {
        requested: String,
        active: Option<String>,
    },
    #[error("no transcript available, record audio first")]
    NoTranscriptAvailable,
    #[error("translation failed: {0}")]
    TranslationFailed(String),
    #[error("audio not found: {0}")]
    AudioNotFound(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidLanguage(_)
            | Self::NoAudioProvided
            | Self::TranscodeFailed(_)
            | Self::NoSpeechDetected
            | Self::AudioNotFound(_) => ErrorKind::ClientInput,
            Self::ServiceUnavailable(_) | Self::TranslationFailed(_) => ErrorKind::TransientBackend,
            Self::ModelUnavailable { .. } | Self::ModelNotReady { .. } => ErrorKind::ModelState,
            Self::SessionNotConfigured | Self::NoTranscriptAvailable => ErrorKind::NoInputAvailable,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Stable machine-readable identifier of the variant.
    pub fn code(&self) -> &'static str {
        match self {
            Self::SessionNotConfigured => "session_not_configured",
            Self::InvalidLanguage(_) => "invalid_language",
            Self::NoAudioProvided => "no_audio_provided",
            Self::TranscodeFailed(_) => "transcode_error",
            Self::NoSpeechDetected => "no_speech_detected",
            Self::ServiceUnavailable(_) => "service_unavailable",
            Self::ModelUnavailable { .. } => "model_unavailable",
            Self::ModelNotReady { .. } => "model_not_ready",
            Self::NoTranscriptAvailable => "no_transcript_available",
            Self::TranslationFailed(_) => "translation_failed",
            Self::AudioNotFound(_) => "not_found",
            Self::Internal(_) => "internal",
        }
    }
}

impl From<NormalizationError> for PipelineError {
    fn from(e: NormalizationError) -> Self {
        match e {
            NormalizationError::EmptyInput => Self::NoAudioProvided,
            NormalizationError::NoSamples => Self::NoSpeechDetected,
            NormalizationError::Io(e) => Self::Internal(format!("temporary audio file: {}", e)),
            NormalizationError::Transcode(
                e @ (TranscodeError::ToolUnavailable(_) | TranscodeError::Io(_)),
            ) => Self::Internal(e.to_string()),
            other => Self::TranscodeFailed(other.to_string()),
        }
    }
}

impl From<TranscriptionError> for PipelineError {
    fn from(e: TranscriptionError) -> Self {
        match e {
            TranscriptionError::NoSpeechDetected => Self::NoSpeechDetected,
            other => Self::ServiceUnavailable(other.to_string()),
        }
    }
}

impl From<ModelRegistryError> for PipelineError {
    fn from(e: ModelRegistryError) -> Self {
        match e {
            ModelRegistryError::ModelUnavailable { pair, reason } => {
                Self::ModelUnavailable { pair, reason }
            }
            ModelRegistryError::ModelNotReady { requested, active } => {
                Self::ModelNotReady { requested, active }
            }
            ModelRegistryError::TranslationFailed(reason) => Self::TranslationFailed(reason),
        }
    }
}

impl From<SessionError> for PipelineError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::NotConfigured => Self::SessionNotConfigured,
            SessionError::NoTranscript => Self::NoTranscriptAvailable,
        }
    }
}

impl From<LanguagePairError> for PipelineError {
    fn from(e: LanguagePairError) -> Self {
        Self::InvalidLanguage(e.to_string())
    }
}
