use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;

use crate::application::ports::{AudioStore, AudioStoreError};

use super::local_audio_store::LocalAudioStore;
use super::memory_audio_store::InMemoryAudioStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProvider {
    Local,
    Memory,
}

pub struct AudioStoreFactory;

impl AudioStoreFactory {
    pub fn create(
        provider: StorageProvider,
        local_path: &str,
    ) -> Result<Arc<dyn AudioStore>, AudioStoreError> {
        match provider {
            StorageProvider::Local => {
                let store = LocalAudioStore::new(PathBuf::from(local_path))?;
                Ok(Arc::new(store))
            }
            StorageProvider::Memory => Ok(Arc::new(InMemoryAudioStore::new())),
        }
    }
}
