use std::io;

use bytes::Bytes;

use crate::domain::AudioName;

#[async_trait::async_trait]
pub trait AudioStore: Send + Sync {
    async fn store(&self, name: &AudioName, content: Bytes) -> Result<u64, AudioStoreError>;

    async fn fetch(&self, name: &AudioName) -> Result<Vec<u8>, AudioStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioStoreError {
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("download failed: {0}")]
    DownloadFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
