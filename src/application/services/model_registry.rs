use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Mutex;

use crate::application::ports::{TranslationModel, TranslationModelLoader};
use crate::domain::LanguagePair;

#[derive(Clone)]
pub struct ActiveModel {
    pub pair: LanguagePair,
    pub handle: Arc<dyn TranslationModel>,
}

impl fmt::Debug for ActiveModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveModel")
            .field("pair", &self.pair)
            .field("model_id", &self.handle.model_id())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub model: ActiveModel,
    pub reloaded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Fail with `ModelNotReady` unless the requested pair is already active.
    RequireLoaded,
    /// Swap in the requested pair first if needed, under the same lock.
    LoadIfMissing,
}

/// Holds at most one translation model and swaps it when the pair changes.
///
/// Loading and generating share one lock: a reload never overlaps another
/// reload or a translation running on the model being replaced.
pub struct ModelRegistry {
    loader: Arc<dyn TranslationModelLoader>,
    active: Mutex<Option<ActiveModel>>,
    loads: AtomicUsize,
}

impl ModelRegistry {
    pub fn new(loader: Arc<dyn TranslationModelLoader>) -> Self {
        Self {
            loader,
            active: Mutex::new(None),
            loads: AtomicUsize::new(0),
        }
    }

    pub async fn ensure_loaded(&self, pair: &LanguagePair) -> Result<LoadOutcome, ModelRegistryError> {
        let mut active = self.active.lock().await;
        self.load_into(&mut active, pair).await
    }

    pub async fn translate(
        &self,
        pair: &LanguagePair,
        text: &str,
        policy: LoadPolicy,
    ) -> Result<String, ModelRegistryError> {
        let mut active = self.active.lock().await;

        let model = match policy {
            LoadPolicy::LoadIfMissing => self.load_into(&mut active, pair).await?.model,
            LoadPolicy::RequireLoaded => match active.as_ref() {
                Some(current) if current.pair == *pair => current.clone(),
                other => {
                    return Err(ModelRegistryError::ModelNotReady {
                        requested: pair.to_string(),
                        active: other.map(|m| m.pair.to_string()),
                    });
                }
            },
        };

        model
            .handle
            .generate(text)
            .await
            .map_err(|e| ModelRegistryError::TranslationFailed(e.to_string()))
    }

    pub async fn active_pair(&self) -> Option<LanguagePair> {
        self.active.lock().await.as_ref().map(|m| m.pair.clone())
    }

    /// Number of successful model loads since startup.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    async fn load_into(
        &self,
        slot: &mut Option<ActiveModel>,
        pair: &LanguagePair,
    ) -> Result<LoadOutcome, ModelRegistryError> {
        if let Some(current) = slot.as_ref().filter(|m| m.pair == *pair) {
            return Ok(LoadOutcome {
                model: current.clone(),
                reloaded: false,
            });
        }

        let previous = slot.as_ref().map(|m| m.pair.to_string());
        tracing::info!(
            requested = %pair,
            previous = previous.as_deref().unwrap_or("none"),
            "Loading translation model"
        );

        // The slot is only written after a successful load.
        let handle = self.loader.load(pair).await.map_err(|e| {
            tracing::warn!(pair = %pair, error = %e, "Translation model unavailable");
            ModelRegistryError::ModelUnavailable {
                pair: pair.to_string(),
                reason: e.to_string(),
            }
        })?;

        self.loads.fetch_add(1, Ordering::SeqCst);
        tracing::info!(pair = %pair, model = handle.model_id(), "Translation model loaded");

        let model = ActiveModel {
            pair: pair.clone(),
            handle,
        };
        *slot = Some(model.clone());

        Ok(LoadOutcome {
            model,
            reloaded: true,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ModelRegistryError {
    #[error("no translation model available for {pair}: {reason}")]
    ModelUnavailable { pair: String, reason: String },
    #[error("translation model for {requested} is not loaded (active: {})", .active.as_deref().unwrap_or("none"))]
    ModelNotReady {
        requested: String,
        active: Option<String>,
    },
    #[error("translation failed: {0}")]
    TranslationFailed(String),
}
