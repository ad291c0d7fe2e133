use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::LanguagePair;

#[async_trait]
pub trait TranslationModelLoader: Send + Sync {
    async fn load(&self, pair: &LanguagePair) -> Result<Arc<dyn TranslationModel>, ModelLoadError>;
}

#[async_trait]
pub trait TranslationModel: Send + Sync {
    fn model_id(&self) -> &str;

    async fn generate(&self, text: &str) -> Result<String, TranslationModelError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("no model for language pair: {0}")]
    Unsupported(String),
    #[error("model loading failed: {0}")]
    LoadFailed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum TranslationModelError {
    #[error("generation failed: {0}")]
    GenerationFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
