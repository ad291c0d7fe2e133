use bytes::Bytes;

use tolk::application::ports::{AudioStore, AudioStoreError};
use tolk::domain::{AudioFormat, AudioName};
use tolk::infrastructure::storage::InMemoryAudioStore;

use crate::helpers::code;

#[tokio::test]
async fn given_stored_audio_when_fetching_then_returns_bytes() {
    let store = InMemoryAudioStore::new();
    let name = AudioName::derive("hello", &code("en"), AudioFormat::Mp3);

    store.store(&name, Bytes::from_static(b"mp3")).await.unwrap();

    assert_eq!(store.fetch(&name).await.unwrap(), b"mp3");
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn given_empty_store_when_fetching_then_reports_not_found() {
    let store = InMemoryAudioStore::new();
    let name = AudioName::derive("hello", &code("en"), AudioFormat::Wav);

    assert!(store.is_empty().await);
    assert!(matches!(store.fetch(&name).await, Err(AudioStoreError::NotFound(_))));
}
