use std::sync::Arc;

use crate::domain::LanguagePair;

use super::model_registry::{LoadPolicy, ModelRegistry, ModelRegistryError};

pub struct TranslationStage {
    registry: Arc<ModelRegistry>,
    policy: LoadPolicy,
}

impl TranslationStage {
    pub fn new(registry: Arc<ModelRegistry>, policy: LoadPolicy) -> Self {
        Self { registry, policy }
    }

    pub async fn translate(&self, text: &str, pair: &LanguagePair) -> Result<String, ModelRegistryError> {
        let translated = self.registry.translate(pair, text, self.policy).await?;
        let translated = translated.trim().to_string();

        if translated.is_empty() {
            return Err(ModelRegistryError::TranslationFailed(
                "model returned an empty translation".to_string(),
            ));
        }

        tracing::info!(
            pair = %pair,
            source_chars = text.chars().count(),
            translated_chars = translated.chars().count(),
            "Text translated"
        );

        Ok(translated)
    }
}
