use config::{Config, ConfigError, Environment as EnvironmentSource, File};
use serde::Deserialize;

use crate::domain::{LanguagePair, LanguagePairError, ReconfigurePolicy};
use crate::infrastructure::audio::TranscriptionProvider;
use crate::infrastructure::speech::SynthesisProvider;
use crate::infrastructure::storage::StorageProvider;

use super::Environment;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub pipeline: PipelineSettings,
    pub audio: AudioSettings,
    pub transcription: TranscriptionSettings,
    pub translation: TranslationSettings,
    pub synthesis: SynthesisSettings,
    pub storage: StorageSettings,
}

impl Settings {
    /// Layers `appsettings.{env}` (optional) under `APP_*` variables, where
    /// `__` separates sections: `APP_PIPELINE__DEFAULT_TARGET=fr`.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str().to_lowercase()))
                    .required(false),
            )
            .add_source(
                EnvironmentSource::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            enable_json: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Pair given to new sessions. Leave either side empty to start idle.
    pub default_source: String,
    pub default_target: String,
    /// Load the session's model on translate when another pair holds the slot.
    pub reload_on_translate: bool,
    pub reconfigure_policy: ReconfigurePolicy,
    pub preload_default_model: bool,
    pub max_upload_mb: usize,
    pub session_idle_timeout_secs: u64,
    pub session_sweep_interval_secs: u64,
}

impl PipelineSettings {
    pub fn default_pair(&self) -> Result<Option<LanguagePair>, LanguagePairError> {
        if self.default_source.trim().is_empty() || self.default_target.trim().is_empty() {
            return Ok(None);
        }
        LanguagePair::parse(&self.default_source, &self.default_target).map(Some)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            default_source: "en".to_string(),
            default_target: "zh".to_string(),
            reload_on_translate: true,
            reconfigure_policy: ReconfigurePolicy::default(),
            preload_default_model: true,
            max_upload_mb: 25,
            session_idle_timeout_secs: 1800,
            session_sweep_interval_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub ffmpeg_binary: String,
    pub default_extension: String,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            ffmpeg_binary: "ffmpeg".to_string(),
            default_extension: "wav".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    pub provider: TranscriptionProvider,
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            provider: TranscriptionProvider::Local,
            model: "openai/whisper-base".to_string(),
            api_key: None,
            base_url: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TranslationSettings {
    pub hub_url: Option<String>,
    pub inference_url: Option<String>,
    /// `{src}` and `{trg}` are replaced by the primary language subtags.
    pub model_template: Option<String>,
    pub api_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SynthesisSettings {
    pub provider: SynthesisProvider,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub voice: Option<String>,
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self {
            provider: SynthesisProvider::Google,
            base_url: None,
            api_key: None,
            model: None,
            voice: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub provider: StorageProvider,
    pub local_path: String,
    pub public_prefix: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            provider: StorageProvider::Local,
            local_path: "./data/audio".to_string(),
            public_prefix: "/api/v1/audio".to_string(),
        }
    }
}
