mod local_audio_store;
mod memory_audio_store;
mod store_factory;

pub use local_audio_store::LocalAudioStore;
pub use memory_audio_store::InMemoryAudioStore;
pub use store_factory::{AudioStoreFactory, StorageProvider};
