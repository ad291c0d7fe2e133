use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{AudioTranscoder, TranscodeError};
use crate::domain::{CANONICAL_CHANNELS, CANONICAL_SAMPLE_RATE};

const MAX_STDERR_CHARS: usize = 400;

pub struct FfmpegTranscoder {
    binary: String,
}

impl FfmpegTranscoder {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

#[async_trait]
impl AudioTranscoder for FfmpegTranscoder {
    async fn transcode(&self, input: &Path, output: &Path) -> Result<(), TranscodeError> {
        let channels = CANONICAL_CHANNELS.to_string();
        let sample_rate = CANONICAL_SAMPLE_RATE.to_string();

        let result = Command::new(&self.binary)
            .args(["-y", "-hide_banner", "-loglevel", "error", "-i"])
            .arg(input)
            .args([
                "-ac",
                channels.as_str(),
                "-ar",
                sample_rate.as_str(),
                "-c:a",
                "pcm_s16le",
                "-f",
                "wav",
            ])
            .arg(output)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    TranscodeError::ToolUnavailable(format!("{}: {}", self.binary, e))
                }
                _ => TranscodeError::Io(e),
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let stderr: String = stderr.trim().chars().take(MAX_STDERR_CHARS).collect();
            tracing::warn!(status = %result.status, stderr = %stderr, "ffmpeg rejected upload");
            return Err(TranscodeError::ToolFailed {
                status: result.status.to_string(),
                stderr,
            });
        }

        Ok(())
    }
}

pub fn check_ffmpeg_binary(binary: &str) -> Result<(), TranscodeError> {
    let output = std::process::Command::new(binary)
        .arg("-version")
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
        .map_err(|e| TranscodeError::ToolUnavailable(format!("{}: {}", binary, e)))?;

    if !output.status.success() {
        return Err(TranscodeError::ToolUnavailable(format!(
            "{} -version exited with {}",
            binary, output.status
        )));
    }

    let version = String::from_utf8_lossy(&output.stdout);
    tracing::info!(
        version = version.lines().next().unwrap_or("unknown"),
        "ffmpeg available"
    );
    Ok(())
}
