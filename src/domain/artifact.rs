use bytes::Bytes;

use super::audio_name::AudioName;
use super::language_code::LanguageCode;
use super::transcript::TranscriptionResult;

#[derive(Debug, Clone)]
pub struct AudioArtifact {
    pub name: AudioName,
    pub content: Bytes,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AudioOutcome {
    Stored { name: AudioName, url: String },
    Failed { reason: String },
}

#[derive(Debug, Clone)]
pub struct TranslationArtifact {
    pub original: TranscriptionResult,
    pub translated_text: String,
    pub target_language: LanguageCode,
    pub audio: AudioOutcome,
}

impl TranslationArtifact {
    pub fn audio_url(&self) -> Option<&str> {
        match &self.audio {
            AudioOutcome::Stored { url, .. } => Some(url),
            AudioOutcome::Failed { .. } => None,
        }
    }

    pub fn audio_error(&self) -> Option<&str> {
        match &self.audio {
            AudioOutcome::Stored { .. } => None,
            AudioOutcome::Failed { reason } => Some(reason),
        }
    }

    pub fn is_partial(&self) -> bool {
        matches!(self.audio, AudioOutcome::Failed { .. })
    }
}
