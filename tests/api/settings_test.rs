use tolk::domain::ReconfigurePolicy;
use tolk::infrastructure::audio::TranscriptionProvider;
use tolk::infrastructure::speech::SynthesisProvider;
use tolk::infrastructure::storage::StorageProvider;
use tolk::presentation::config::{Environment, PipelineSettings, Settings};

use crate::helpers::pair;

#[test]
fn given_defaults_when_building_settings_then_pipeline_starts_english_to_chinese() {
    let settings = Settings::default();

    assert_eq!(
        settings.pipeline.default_pair().unwrap(),
        Some(pair("en", "zh"))
    );
    assert!(settings.pipeline.reload_on_translate);
    assert_eq!(
        settings.pipeline.reconfigure_policy,
        ReconfigurePolicy::ClearOnSourceChange
    );
    assert_eq!(settings.audio.default_extension, "wav");
    assert_eq!(settings.storage.public_prefix, "/api/v1/audio");
    assert_eq!(settings.storage.provider, StorageProvider::Local);
    assert_eq!(settings.transcription.provider, TranscriptionProvider::Local);
    assert_eq!(settings.synthesis.provider, SynthesisProvider::Google);
}

#[test]
fn given_blank_default_target_when_resolving_pair_then_sessions_start_idle() {
    let settings = PipelineSettings {
        default_target: String::new(),
        ..Default::default()
    };

    assert_eq!(settings.default_pair().unwrap(), None);
}

#[test]
fn given_identical_default_languages_when_resolving_pair_then_fails() {
    let settings = PipelineSettings {
        default_source: "en".to_string(),
        default_target: "en".to_string(),
        ..Default::default()
    };

    assert!(settings.default_pair().is_err());
}

#[test]
fn given_upload_limit_in_megabytes_when_converting_then_returns_bytes() {
    let settings = PipelineSettings {
        max_upload_mb: 2,
        ..Default::default()
    };

    assert_eq!(settings.max_upload_bytes(), 2 * 1024 * 1024);
}

#[test]
fn given_partial_json_when_deserializing_then_fills_remaining_defaults() {
    let settings: Settings = serde_json::from_value(serde_json::json!({
        "pipeline": { "default_target": "fr", "reconfigure_policy": "clear_transcript" },
        "storage": { "provider": "memory" }
    }))
    .unwrap();

    assert_eq!(settings.pipeline.default_pair().unwrap(), Some(pair("en", "fr")));
    assert_eq!(
        settings.pipeline.reconfigure_policy,
        ReconfigurePolicy::ClearTranscript
    );
    assert_eq!(settings.storage.provider, StorageProvider::Memory);
    assert_eq!(settings.server.port, 5000);
}

#[test]
fn given_environment_names_when_parsing_then_accepts_known_values() {
    assert_eq!(Environment::try_from("PROD".to_string()), Ok(Environment::Prod));
    assert_eq!(Environment::try_from("test".to_string()), Ok(Environment::Test));
    assert!(Environment::try_from("staging".to_string()).is_err());
}

#[test]
fn given_no_settings_file_when_loading_then_uses_defaults() {
    let settings = Settings::load(Environment::Test).unwrap();

    assert!(!settings.server.host.is_empty());
}
