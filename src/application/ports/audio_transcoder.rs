use std::path::Path;

use async_trait::async_trait;

#[async_trait]
pub trait AudioTranscoder: Send + Sync {
    async fn transcode(&self, input: &Path, output: &Path) -> Result<(), TranscodeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscodeError {
    #[error("transcoder not available: {0}")]
    ToolUnavailable(String),
    #[error("transcoder exited with {status}: {stderr}")]
    ToolFailed { status: String, stderr: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
