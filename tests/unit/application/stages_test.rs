use std::sync::Arc;

use tolk::application::ports::{SynthesisError, TranscriptionError};
use tolk::application::services::{
    LoadPolicy, ModelRegistry, ModelRegistryError, SynthesisStage, TranscriptionStage,
    TranslationStage,
};
use tolk::domain::{AudioFormat, AudioName, AudioOutcome};
use tolk::infrastructure::storage::InMemoryAudioStore;

use crate::helpers::{
    AUDIO_PREFIX, FailingAudioStore, MockModelLoader, MockSynthesizer, MockTranscriptionEngine,
    code, normalized_audio, pair,
};

#[tokio::test]
async fn given_engine_text_when_transcribing_then_returns_trimmed_text_in_requested_language() {
    let engine = Arc::new(MockTranscriptionEngine::returning("  hello world \n"));
    let stage = TranscriptionStage::new(engine.clone());

    let result = stage.transcribe(&normalized_audio(), &code("en")).await.unwrap();

    assert_eq!(result.text, "hello world");
    assert_eq!(result.language, code("en"));
    assert_eq!(engine.languages.lock().unwrap().as_slice(), ["en"]);
}

#[tokio::test]
async fn given_blank_engine_text_when_transcribing_then_reports_no_speech() {
    let stage = TranscriptionStage::new(Arc::new(MockTranscriptionEngine::returning("  \n ")));

    let result = stage.transcribe(&normalized_audio(), &code("en")).await;

    assert!(matches!(result, Err(TranscriptionError::NoSpeechDetected)));
}

#[tokio::test]
async fn given_unavailable_engine_when_transcribing_then_propagates_error() {
    let stage = TranscriptionStage::new(Arc::new(MockTranscriptionEngine::failing(|| {
        TranscriptionError::ServiceUnavailable("connection refused".to_string())
    })));

    let result = stage.transcribe(&normalized_audio(), &code("en")).await;

    assert!(matches!(result, Err(TranscriptionError::ServiceUnavailable(_))));
}

#[tokio::test]
async fn given_model_returning_whitespace_when_translating_then_reports_failure() {
    let loader = MockModelLoader::supporting(&[("en", "zh")]).with_phrase("silence", "   ");
    let registry = Arc::new(ModelRegistry::new(Arc::new(loader)));
    let stage = TranslationStage::new(registry, LoadPolicy::LoadIfMissing);

    let result = stage.translate("silence", &pair("en", "zh")).await;

    assert!(matches!(result, Err(ModelRegistryError::TranslationFailed(_))));
}

#[tokio::test]
async fn given_known_phrase_when_translating_then_returns_translation() {
    let registry = Arc::new(ModelRegistry::new(Arc::new(MockModelLoader::supporting(&[(
        "en", "zh",
    )]))));
    let stage = TranslationStage::new(registry, LoadPolicy::LoadIfMissing);

    let translated = stage.translate("hello world", &pair("en", "zh")).await.unwrap();

    assert_eq!(translated, "你好世界");
}

#[tokio::test]
async fn given_blank_text_when_synthesizing_then_rejects_without_calling_backend() {
    let synthesizer = Arc::new(MockSynthesizer::working());
    let stage = SynthesisStage::new(
        synthesizer.clone(),
        Arc::new(InMemoryAudioStore::new()),
        AUDIO_PREFIX,
    );

    let result = stage.synthesize("  ", &code("zh")).await;

    assert!(matches!(result, Err(SynthesisError::EmptyText)));
    assert_eq!(synthesizer.call_count(), 0);
}

#[tokio::test]
async fn given_text_when_rendering_then_stores_under_content_derived_name() {
    let store = Arc::new(InMemoryAudioStore::new());
    let stage = SynthesisStage::new(Arc::new(MockSynthesizer::working()), store.clone(), AUDIO_PREFIX);

    let outcome = stage.render("你好世界", &code("zh")).await;

    let expected = AudioName::derive("你好世界", &code("zh"), AudioFormat::Mp3);
    assert_eq!(
        outcome,
        AudioOutcome::Stored {
            url: format!("{}/{}", AUDIO_PREFIX, expected),
            name: expected.clone(),
        }
    );
    assert_eq!(store.len().await, 1);
    assert!(!stage.fetch(&expected).await.unwrap().is_empty());
}

#[tokio::test]
async fn given_same_text_rendered_twice_when_storing_then_reuses_one_name() {
    let store = Arc::new(InMemoryAudioStore::new());
    let stage = SynthesisStage::new(Arc::new(MockSynthesizer::working()), store.clone(), AUDIO_PREFIX);

    let first = stage.render("bonjour", &code("fr")).await;
    let second = stage.render("bonjour", &code("fr")).await;

    assert_eq!(first, second);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn given_failing_synthesizer_when_rendering_then_degrades_to_failed_outcome() {
    let stage = SynthesisStage::new(
        Arc::new(MockSynthesizer::failing()),
        Arc::new(InMemoryAudioStore::new()),
        AUDIO_PREFIX,
    );

    let outcome = stage.render("你好世界", &code("zh")).await;

    assert!(matches!(outcome, AudioOutcome::Failed { ref reason } if reason.contains("synthesis")));
}

#[tokio::test]
async fn given_failing_store_when_rendering_then_degrades_to_failed_outcome() {
    let stage = SynthesisStage::new(
        Arc::new(MockSynthesizer::working()),
        Arc::new(FailingAudioStore),
        AUDIO_PREFIX,
    );

    let outcome = stage.render("你好世界", &code("zh")).await;

    assert!(matches!(outcome, AudioOutcome::Failed { ref reason } if reason.contains("storage")));
}

#[test]
fn given_prefix_with_trailing_slash_when_building_url_then_avoids_double_slash() {
    let stage = SynthesisStage::new(
        Arc::new(MockSynthesizer::working()),
        Arc::new(InMemoryAudioStore::new()),
        "https://cdn.example.com/audio/",
    );
    let name = AudioName::derive("hi", &code("en"), AudioFormat::Mp3);

    assert_eq!(
        stage.url_for(&name),
        format!("https://cdn.example.com/audio/{}", name)
    );
}
