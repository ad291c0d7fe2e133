use std::io;
use std::sync::Arc;

use crate::application::ports::{AudioTranscoder, TranscodeError};
use crate::domain::{AudioBlob, NormalizedAudio, WavFormatError};

pub const DEFAULT_UPLOAD_EXTENSION: &str = "wav";

pub struct AudioNormalizer {
    transcoder: Arc<dyn AudioTranscoder>,
    default_extension: String,
}

impl AudioNormalizer {
    pub fn new(transcoder: Arc<dyn AudioTranscoder>, default_extension: impl Into<String>) -> Self {
        Self {
            transcoder,
            default_extension: default_extension.into(),
        }
    }

    pub async fn normalize(&self, blob: &AudioBlob) -> Result<NormalizedAudio, NormalizationError> {
        if blob.is_empty() {
            return Err(NormalizationError::EmptyInput);
        }

        let extension = blob
            .content_type()
            .and_then(extension_for_mime)
            .unwrap_or(&self.default_extension);

        // Both files are removed when these guards drop, on every return path.
        let input = tempfile::Builder::new()
            .prefix("tolk-in-")
            .suffix(&format!(".{}", extension))
            .tempfile()?;
        let output = tempfile::Builder::new()
            .prefix("tolk-out-")
            .suffix(".wav")
            .tempfile()?;

        tokio::fs::write(input.path(), blob.bytes()).await?;

        tracing::debug!(
            bytes = blob.len(),
            content_type = blob.content_type().unwrap_or("none"),
            extension = %extension,
            "Transcoding upload to 16kHz mono PCM"
        );

        self.transcoder
            .transcode(input.path(), output.path())
            .await
            .map_err(NormalizationError::Transcode)?;

        let wav = tokio::fs::read(output.path()).await?;
        if wav.is_empty() {
            return Err(NormalizationError::NoOutput);
        }

        let audio = NormalizedAudio::from_wav(wav).map_err(|e| match e {
            // A well-formed header with no samples is a silent recording, not a bad upload.
            WavFormatError::EmptyData => NormalizationError::NoSamples,
            other => NormalizationError::InvalidOutput(other),
        })?;

        tracing::debug!(
            samples = audio.sample_count(),
            duration_secs = audio.duration_secs(),
            "Audio normalized"
        );

        Ok(audio)
    }
}

pub fn extension_for_mime(mime: &str) -> Option<&'static str> {
    let essence = mime.split(';').next().unwrap_or_default().trim();
    match essence.to_ascii_lowercase().as_str() {
        "audio/wav" | "audio/x-wav" | "audio/wave" | "audio/vnd.wave" => Some("wav"),
        "audio/webm" | "video/webm" => Some("webm"),
        "audio/ogg" | "application/ogg" => Some("ogg"),
        "audio/mpeg" | "audio/mp3" => Some("mp3"),
        "audio/mp4" | "audio/x-m4a" | "audio/m4a" | "audio/aac" => Some("m4a"),
        "audio/flac" | "audio/x-flac" => Some("flac"),
        _ => None,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NormalizationError {
    #[error("no audio provided")]
    EmptyInput,
    #[error("transcode failed: {0}")]
    Transcode(TranscodeError),
    #[error("transcoder produced no output")]
    NoOutput,
    #[error("decoded audio contains no samples")]
    NoSamples,
    #[error("transcoder output is not canonical: {0}")]
    InvalidOutput(WavFormatError),
    #[error("temporary file error: {0}")]
    Io(#[from] io::Error),
}
