mod candle_whisper_engine;
mod ffmpeg_transcoder;
mod openai_whisper_engine;
mod transcription_engine_factory;
pub mod wav_samples;

pub use candle_whisper_engine::CandleWhisperEngine;
pub use ffmpeg_transcoder::{FfmpegTranscoder, check_ffmpeg_binary};
pub use openai_whisper_engine::OpenAiWhisperEngine;
pub use transcription_engine_factory::{TranscriptionEngineFactory, TranscriptionProvider};
