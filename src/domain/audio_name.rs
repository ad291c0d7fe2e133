use std::fmt;

use sha2::{Digest, Sha256};

use super::language_code::LanguageCode;

const DIGEST_HEX_LEN: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    Mp3,
    Wav,
}

impl AudioFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
        }
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "mp3" => Some(Self::Mp3),
            "wav" => Some(Self::Wav),
            _ => None,
        }
    }
}

/// Content-addressed file name of synthesized speech:
/// `sha256(language || 0x00 || text)` in lowercase hex plus the format extension.
///
/// Identical text in the same language always maps to the same name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioName {
    name: String,
    format: AudioFormat,
}

impl AudioName {
    pub fn derive(text: &str, language: &LanguageCode, format: AudioFormat) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(language.as_str().as_bytes());
        hasher.update([0u8]);
        hasher.update(text.as_bytes());
        let digest = hasher.finalize();

        Self {
            name: format!("{:x}.{}", digest, format.extension()),
            format,
        }
    }

    /// Accepts only names this type could have derived, so a parsed name is
    /// always a single safe path segment.
    pub fn parse(raw: &str) -> Result<Self, AudioNameError> {
        let (digest, extension) = raw
            .rsplit_once('.')
            .ok_or_else(|| AudioNameError::Malformed(raw.to_string()))?;

        if digest.len() != DIGEST_HEX_LEN
            || !digest
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        {
            return Err(AudioNameError::Malformed(raw.to_string()));
        }

        let format = AudioFormat::from_extension(extension)
            .ok_or_else(|| AudioNameError::UnknownFormat(extension.to_string()))?;

        Ok(Self {
            name: format!("{}.{}", digest, format.extension()),
            format,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }
}

impl fmt::Display for AudioName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AudioNameError {
    #[error("malformed audio name: {0}")]
    Malformed(String),
    #[error("unknown audio format: {0}")]
    UnknownFormat(String),
}
