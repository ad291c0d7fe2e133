use std::collections::HashMap;

use bytes::Bytes;
use tokio::sync::RwLock;

use crate::application::ports::{AudioStore, AudioStoreError};
use crate::domain::AudioName;

#[derive(Default)]
pub struct InMemoryAudioStore {
    objects: RwLock<HashMap<String, Bytes>>,
}

impl InMemoryAudioStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl AudioStore for InMemoryAudioStore {
    async fn store(&self, name: &AudioName, content: Bytes) -> Result<u64, AudioStoreError> {
        let size = content.len() as u64;
        self.objects
            .write()
            .await
            .insert(name.as_str().to_string(), content);
        Ok(size)
    }

    async fn fetch(&self, name: &AudioName) -> Result<Vec<u8>, AudioStoreError> {
        self.objects
            .read()
            .await
            .get(name.as_str())
            .map(|b| b.to_vec())
            .ok_or_else(|| AudioStoreError::NotFound(name.to_string()))
    }
}
