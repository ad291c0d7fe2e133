#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;

use tolk::application::ports::{
    AudioStore, AudioStoreError, AudioTranscoder, ModelLoadError, SpeechSynthesizer,
    SynthesisError, SynthesizedSpeech, TranscodeError, TranscriptionEngine, TranscriptionError,
    TranslationModel, TranslationModelError, TranslationModelLoader,
};
use tolk::application::services::{
    AudioNormalizer, LoadPolicy, ModelRegistry, PipelineService, SessionStore, SynthesisStage,
    TranscriptionStage, TranslationStage,
};
use tolk::domain::{
    AudioFormat, AudioName, LanguageCode, LanguagePair, NormalizedAudio, ReconfigurePolicy,
};
use tolk::infrastructure::storage::InMemoryAudioStore;

pub const AUDIO_PREFIX: &str = "/api/v1/audio";

pub fn pair(source: &str, target: &str) -> LanguagePair {
    LanguagePair::parse(source, target).unwrap()
}

pub fn code(raw: &str) -> LanguageCode {
    LanguageCode::parse(raw).unwrap()
}

pub fn build_wav(sample_rate: u32, channels: u16, samples: &[i16]) -> Vec<u8> {
    let data_size = (samples.len() * 2) as u32;
    let block_align = channels * 2;
    let byte_rate = sample_rate * block_align as u32;

    let mut wav = Vec::with_capacity(44 + data_size as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_size).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&channels.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    for &s in samples {
        wav.extend_from_slice(&s.to_le_bytes());
    }
    wav
}

/// One tenth of a second of canonical silence.
pub fn canonical_wav() -> Vec<u8> {
    build_wav(16_000, 1, &[0i16; 1600])
}

pub fn normalized_audio() -> NormalizedAudio {
    NormalizedAudio::from_wav(canonical_wav()).unwrap()
}

pub enum TranscoderBehavior {
    Write(Vec<u8>),
    Fail,
    WriteNothing,
}

pub struct MockTranscoder {
    behavior: TranscoderBehavior,
    pub calls: Mutex<Vec<(PathBuf, PathBuf)>>,
}

impl MockTranscoder {
    pub fn writing(wav: Vec<u8>) -> Self {
        Self::with(TranscoderBehavior::Write(wav))
    }

    pub fn canonical() -> Self {
        Self::writing(canonical_wav())
    }

    pub fn failing() -> Self {
        Self::with(TranscoderBehavior::Fail)
    }

    pub fn silent() -> Self {
        Self::with(TranscoderBehavior::WriteNothing)
    }

    fn with(behavior: TranscoderBehavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_paths(&self) -> Option<(PathBuf, PathBuf)> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl AudioTranscoder for MockTranscoder {
    async fn transcode(&self, input: &Path, output: &Path) -> Result<(), TranscodeError> {
        self.calls
            .lock()
            .unwrap()
            .push((input.to_path_buf(), output.to_path_buf()));

        assert!(input.exists(), "input file must exist while transcoding");

        match &self.behavior {
            TranscoderBehavior::Write(wav) => {
                std::fs::write(output, wav)?;
                Ok(())
            }
            TranscoderBehavior::Fail => Err(TranscodeError::ToolFailed {
                status: "exit status: 1".to_string(),
                stderr: "Invalid data found when processing input".to_string(),
            }),
            TranscoderBehavior::WriteNothing => Ok(()),
        }
    }
}

pub struct MockTranscriptionEngine {
    result: Result<String, fn() -> TranscriptionError>,
    pub calls: AtomicUsize,
    pub languages: Mutex<Vec<String>>,
}

impl MockTranscriptionEngine {
    pub fn returning(text: &str) -> Self {
        Self {
            result: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
            languages: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: fn() -> TranscriptionError) -> Self {
        Self {
            result: Err(error),
            calls: AtomicUsize::new(0),
            languages: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranscriptionEngine for MockTranscriptionEngine {
    async fn transcribe(
        &self,
        _audio: &NormalizedAudio,
        language: &LanguageCode,
    ) -> Result<String, TranscriptionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.languages.lock().unwrap().push(language.to_string());
        match &self.result {
            Ok(text) => Ok(text.clone()),
            Err(make) => Err(make()),
        }
    }
}

pub struct MockTranslationModel {
    id: String,
    phrases: HashMap<String, String>,
    fail: bool,
}

#[async_trait]
impl TranslationModel for MockTranslationModel {
    fn model_id(&self) -> &str {
        &self.id
    }

    async fn generate(&self, text: &str) -> Result<String, TranslationModelError> {
        if self.fail {
            return Err(TranslationModelError::GenerationFailed(
                "inference backend timed out".to_string(),
            ));
        }
        Ok(self
            .phrases
            .get(text)
            .cloned()
            .unwrap_or_else(|| format!("[{}] {}", self.id, text)))
    }
}

/// Loads `mock/{src}-{trg}` for supported pairs and counts every load.
pub struct MockModelLoader {
    supported: HashSet<(String, String)>,
    phrases: HashMap<String, String>,
    failing_generation: bool,
    pub loads: AtomicUsize,
    pub loaded_pairs: Mutex<Vec<String>>,
}

impl MockModelLoader {
    pub fn supporting(pairs: &[(&str, &str)]) -> Self {
        Self {
            supported: pairs
                .iter()
                .map(|(s, t)| (s.to_string(), t.to_string()))
                .collect(),
            phrases: HashMap::from([
                ("hello world".to_string(), "你好世界".to_string()),
                ("good morning".to_string(), "bonjour".to_string()),
            ]),
            failing_generation: false,
            loads: AtomicUsize::new(0),
            loaded_pairs: Mutex::new(Vec::new()),
        }
    }

    pub fn with_failing_generation(mut self) -> Self {
        self.failing_generation = true;
        self
    }

    pub fn with_phrase(mut self, source: &str, translated: &str) -> Self {
        self.phrases.insert(source.to_string(), translated.to_string());
        self
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationModelLoader for MockModelLoader {
    async fn load(&self, pair: &LanguagePair) -> Result<Arc<dyn TranslationModel>, ModelLoadError> {
        let key = (
            pair.source().primary().to_string(),
            pair.target().primary().to_string(),
        );
        if !self.supported.contains(&key) {
            return Err(ModelLoadError::Unsupported(pair.to_string()));
        }

        self.loads.fetch_add(1, Ordering::SeqCst);
        self.loaded_pairs.lock().unwrap().push(pair.to_string());

        Ok(Arc::new(MockTranslationModel {
            id: format!("mock/{}-{}", key.0, key.1),
            phrases: self.phrases.clone(),
            fail: self.failing_generation,
        }))
    }
}

pub struct MockSynthesizer {
    fail: bool,
    pub calls: AtomicUsize,
}

impl MockSynthesizer {
    pub fn working() -> Self {
        Self {
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    async fn synthesize(
        &self,
        text: &str,
        language: &LanguageCode,
    ) -> Result<SynthesizedSpeech, SynthesisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SynthesisError::ApiRequestFailed(
                "503 Service Unavailable".to_string(),
            ));
        }
        Ok(SynthesizedSpeech {
            content: Bytes::from(format!("ID3 {}:{}", language, text)),
            format: AudioFormat::Mp3,
        })
    }
}

pub struct FailingAudioStore;

#[async_trait]
impl AudioStore for FailingAudioStore {
    async fn store(&self, _name: &AudioName, _content: Bytes) -> Result<u64, AudioStoreError> {
        Err(AudioStoreError::UploadFailed("disk full".to_string()))
    }

    async fn fetch(&self, name: &AudioName) -> Result<Vec<u8>, AudioStoreError> {
        Err(AudioStoreError::NotFound(name.to_string()))
    }
}

pub struct PipelineBuilder {
    pub default_pair: Option<LanguagePair>,
    pub transcoder: Arc<MockTranscoder>,
    pub engine: Arc<MockTranscriptionEngine>,
    pub loader: Arc<MockModelLoader>,
    pub synthesizer: Arc<MockSynthesizer>,
    pub store: Arc<dyn AudioStore>,
    pub load_policy: LoadPolicy,
    pub reconfigure_policy: ReconfigurePolicy,
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self {
            default_pair: Some(pair("en", "zh")),
            transcoder: Arc::new(MockTranscoder::canonical()),
            engine: Arc::new(MockTranscriptionEngine::returning("hello world")),
            loader: Arc::new(MockModelLoader::supporting(&[
                ("en", "zh"),
                ("en", "fr"),
                ("zh", "en"),
            ])),
            synthesizer: Arc::new(MockSynthesizer::working()),
            store: Arc::new(InMemoryAudioStore::new()),
            load_policy: LoadPolicy::LoadIfMissing,
            reconfigure_policy: ReconfigurePolicy::default(),
        }
    }
}

pub struct TestPipeline {
    pub service: Arc<PipelineService>,
    pub transcoder: Arc<MockTranscoder>,
    pub engine: Arc<MockTranscriptionEngine>,
    pub loader: Arc<MockModelLoader>,
    pub synthesizer: Arc<MockSynthesizer>,
    pub store: Arc<dyn AudioStore>,
}

impl PipelineBuilder {
    pub fn build(self) -> TestPipeline {
        let sessions = Arc::new(SessionStore::new(self.default_pair));
        let registry = Arc::new(ModelRegistry::new(self.loader.clone()));

        let service = PipelineService::new(
            sessions,
            Arc::clone(&registry),
            AudioNormalizer::new(self.transcoder.clone(), "wav"),
            TranscriptionStage::new(self.engine.clone()),
            TranslationStage::new(registry, self.load_policy),
            SynthesisStage::new(self.synthesizer.clone(), Arc::clone(&self.store), AUDIO_PREFIX),
            self.reconfigure_policy,
        );

        TestPipeline {
            service: Arc::new(service),
            transcoder: self.transcoder,
            engine: self.engine,
            loader: self.loader,
            synthesizer: self.synthesizer,
            store: self.store,
        }
    }
}

pub fn default_pipeline() -> TestPipeline {
    PipelineBuilder::default().build()
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn serve(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}
