use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;

use tolk::application::ports::{SpeechSynthesizer, SynthesisError};
use tolk::infrastructure::speech::{SynthesisProvider, SynthesizerFactory};

use crate::helpers::{code, serve};

type Bodies = Arc<Mutex<Vec<Value>>>;

async fn speech_server(reply: &'static [u8]) -> (String, Bodies) {
    let bodies: Bodies = Arc::new(Mutex::new(Vec::new()));
    let router = Router::new()
        .route(
            "/v1/audio/speech",
            post(move |State(bodies): State<Bodies>, Json(body): Json<Value>| async move {
                bodies.lock().unwrap().push(body);
                reply
            }),
        )
        .with_state(bodies.clone());
    (format!("{}/v1", serve(router).await), bodies)
}

#[tokio::test]
async fn given_text_when_synthesizing_then_requests_mp3_with_configured_voice() {
    let (base_url, bodies) = speech_server(b"ID3 fake mp3").await;
    let synthesizer = SynthesizerFactory::create(
        SynthesisProvider::OpenAi,
        Some(base_url),
        Some("test-key".to_string()),
        None,
        Some("nova".to_string()),
    );

    let speech = synthesizer.synthesize("bonjour", &code("fr")).await.unwrap();

    assert_eq!(&speech.content[..], b"ID3 fake mp3");
    let body = &bodies.lock().unwrap()[0];
    assert_eq!(body["input"], "bonjour");
    assert_eq!(body["voice"], "nova");
    assert_eq!(body["model"], "tts-1");
    assert_eq!(body["response_format"], "mp3");
}

#[tokio::test]
async fn given_empty_reply_when_synthesizing_then_reports_empty_audio() {
    let (base_url, _) = speech_server(b"").await;
    let synthesizer =
        SynthesizerFactory::create(SynthesisProvider::OpenAi, Some(base_url), None, None, None);

    let result = synthesizer.synthesize("bonjour", &code("fr")).await;

    assert!(matches!(result, Err(SynthesisError::EmptyAudio)));
}
