use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::whisper::{self as m, Config};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::{LanguageCode, NormalizedAudio};

use super::wav_samples::decode_samples;

const MAX_DECODE_TOKENS: usize = 224;
const MEL_FILTERS_REPO: &str = "FL33TW00D-HF/whisper-base";

pub struct CandleWhisperEngine {
    runtime: Arc<WhisperRuntime>,
}

struct WhisperRuntime {
    model: Mutex<m::model::Whisper>,
    tokenizer: Tokenizer,
    config: Config,
    device: Device,
    mel_filters: Vec<f32>,
}

impl CandleWhisperEngine {
    pub fn new(model_id: &str) -> Result<Self, TranscriptionError> {
        let device = Device::Cpu;

        tracing::info!(
            device = ?device,
            model = model_id,
            "Initializing Candle Whisper transcription engine"
        );

        let api = Api::new().map_err(|e| TranscriptionError::ModelLoadFailed(e.to_string()))?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

        let config_path = repo
            .get("config.json")
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("config.json: {}", e)))?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("tokenizer.json: {}", e)))?;
        let weights_path = repo.get("model.safetensors").map_err(|e| {
            TranscriptionError::ModelLoadFailed(format!("model.safetensors: {}", e))
        })?;

        let mel_repo = api.repo(Repo::new(MEL_FILTERS_REPO.to_string(), RepoType::Model));
        let mel_bytes_path = mel_repo
            .get("melfilters.bytes")
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("melfilters.bytes: {}", e)))?;

        let config_contents = std::fs::read_to_string(&config_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("read config: {}", e)))?;
        let config: Config = serde_json::from_str(&config_contents)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("parse config: {}", e)))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("tokenizer: {}", e)))?;

        let mel_bytes = std::fs::read(&mel_bytes_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("mel filters: {}", e)))?;
        let mel_filters = read_mel_filters(&mel_bytes, &config)?;

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], m::DTYPE, &device)
                .map_err(|e| TranscriptionError::ModelLoadFailed(format!("weights: {}", e)))?
        };

        let model = m::model::Whisper::load(&vb, config.clone())
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("model: {}", e)))?;

        tracing::info!("Candle Whisper engine loaded successfully");

        Ok(Self {
            runtime: Arc::new(WhisperRuntime {
                model: Mutex::new(model),
                tokenizer,
                config,
                device,
                mel_filters,
            }),
        })
    }
}

#[async_trait]
impl TranscriptionEngine for CandleWhisperEngine {
    async fn transcribe(
        &self,
        audio: &NormalizedAudio,
        language: &LanguageCode,
    ) -> Result<String, TranscriptionError> {
        let pcm = decode_samples(audio)?;
        let language = language.primary().to_string();
        let runtime = Arc::clone(&self.runtime);

        tokio::task::spawn_blocking(move || runtime.transcribe(&pcm, &language))
            .await
            .map_err(|e| TranscriptionError::ServiceUnavailable(format!("inference task: {}", e)))?
    }
}

impl WhisperRuntime {
    fn transcribe(&self, pcm: &[f32], language: &str) -> Result<String, TranscriptionError> {
        let prompt = [
            token_id(&self.tokenizer, m::SOT_TOKEN)?,
            token_id(&self.tokenizer, &format!("<|{}|>", language)).map_err(|_| {
                TranscriptionError::ServiceUnavailable(format!(
                    "language not supported by model: {}",
                    language
                ))
            })?,
            token_id(&self.tokenizer, m::TRANSCRIBE_TOKEN)?,
            token_id(&self.tokenizer, m::NO_TIMESTAMPS_TOKEN)?,
        ];
        let eot_token = token_id(&self.tokenizer, m::EOT_TOKEN)?;

        let chunk_samples = m::N_SAMPLES;
        let mut mel_tensors = Vec::new();

        for chunk in pcm.chunks(chunk_samples) {
            let mut samples = chunk.to_vec();
            samples.resize(chunk_samples, 0.0);

            let mel_data = m::audio::pcm_to_mel(&self.config, &samples, &self.mel_filters);
            let n_mel = self.config.num_mel_bins;
            let n_frames = mel_data.len() / n_mel;

            let mel_tensor = Tensor::from_vec(mel_data, (1, n_mel, n_frames), &self.device)
                .map_err(|e| inference_error("mel tensor", e))?;
            mel_tensors.push(mel_tensor);
        }

        let mut model = self
            .model
            .lock()
            .map_err(|_| TranscriptionError::ServiceUnavailable("whisper model poisoned".into()))?;

        let mut segments: Vec<String> = Vec::new();
        for (i, mel) in mel_tensors.iter().enumerate() {
            tracing::debug!(segment = i, "Transcribing audio segment");
            let text = self.decode_segment(&mut model, mel, &prompt, eot_token)?;
            if !text.is_empty() {
                segments.push(text);
            }
        }

        let separator = if matches!(language, "zh" | "ja" | "ko") { "" } else { " " };
        let transcript = segments.join(separator);

        if transcript.trim().is_empty() {
            return Err(TranscriptionError::NoSpeechDetected);
        }

        tracing::info!(
            segments = segments.len(),
            chars = transcript.chars().count(),
            "Local Whisper transcription completed"
        );

        Ok(transcript)
    }

    fn decode_segment(
        &self,
        model: &mut m::model::Whisper,
        mel: &Tensor,
        prompt: &[u32],
        eot_token: u32,
    ) -> Result<String, TranscriptionError> {
        let audio_features = model
            .encoder
            .forward(mel, true)
            .map_err(|e| inference_error("encoder", e))?;

        let mut tokens = prompt.to_vec();

        for _ in 0..MAX_DECODE_TOKENS {
            let token_tensor = Tensor::new(tokens.as_slice(), &self.device)
                .and_then(|t| t.unsqueeze(0))
                .map_err(|e| inference_error("tokens", e))?;

            let decoder_output = model
                .decoder
                .forward(&token_tensor, &audio_features, tokens.len() == prompt.len())
                .map_err(|e| inference_error("decoder", e))?;

            let logits = decoder_output
                .squeeze(0)
                .and_then(|out| model.decoder.final_linear(&out))
                .map_err(|e| inference_error("linear", e))?;

            let seq_len = logits.dim(0).map_err(|e| inference_error("logits", e))?;
            let next_token = logits
                .get(seq_len - 1)
                .and_then(|last| last.argmax(0))
                .and_then(|t| t.to_scalar::<u32>())
                .map_err(|e| inference_error("argmax", e))?;

            if next_token == eot_token {
                break;
            }
            tokens.push(next_token);
        }

        model.reset_kv_cache();

        let text = self
            .tokenizer
            .decode(&tokens[prompt.len()..], true)
            .map_err(|e| TranscriptionError::ServiceUnavailable(format!("detokenize: {}", e)))?;

        Ok(text.trim().to_string())
    }
}

fn inference_error(stage: &str, e: candle_core::Error) -> TranscriptionError {
    TranscriptionError::ServiceUnavailable(format!("{}: {}", stage, e))
}

fn token_id(tokenizer: &Tokenizer, token: &str) -> Result<u32, TranscriptionError> {
    tokenizer.token_to_id(token).ok_or_else(|| {
        TranscriptionError::ServiceUnavailable(format!("token not found: {}", token))
    })
}

fn read_mel_filters(bytes: &[u8], config: &Config) -> Result<Vec<f32>, TranscriptionError> {
    let expected_len = config.num_mel_bins * (m::N_FFT / 2 + 1);
    if bytes.len() < expected_len * 4 {
        return Err(TranscriptionError::ModelLoadFailed(format!(
            "mel filters file too small: {} bytes, expected at least {}",
            bytes.len(),
            expected_len * 4
        )));
    }

    let filters: Vec<f32> = bytes
        .chunks_exact(4)
        .take(expected_len)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();

    Ok(filters)
}
