use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::future::try_join_all;

use crate::application::ports::{SpeechSynthesizer, SynthesisError, SynthesizedSpeech};
use crate::domain::{AudioFormat, LanguageCode};

pub const DEFAULT_BASE_URL: &str = "https://translate.google.com";

/// The endpoint rejects longer inputs.
pub const MAX_PIECE_CHARS: usize = 100;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) tolk/0.1";

/// Google Translate's public speech endpoint. Long text is fetched piecewise
/// and the MP3 streams concatenated.
pub struct GoogleTranslateSynthesizer {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslateSynthesizer {
    pub fn new(base_url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    async fn fetch_piece(
        &self,
        piece: &str,
        language: &str,
        idx: usize,
        total: usize,
    ) -> Result<Bytes, SynthesisError> {
        let url = format!("{}/translate_tts", self.base_url.trim_end_matches('/'));
        let idx = idx.to_string();
        let total = total.to_string();
        let textlen = piece.chars().count().to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("q", piece),
                ("tl", language),
                ("idx", idx.as_str()),
                ("total", total.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SynthesisError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(SynthesisError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| SynthesisError::ApiRequestFailed(format!("body: {}", e)))
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTranslateSynthesizer {
    async fn synthesize(
        &self,
        text: &str,
        language: &LanguageCode,
    ) -> Result<SynthesizedSpeech, SynthesisError> {
        let pieces = split_text(text, MAX_PIECE_CHARS);
        if pieces.is_empty() {
            return Err(SynthesisError::EmptyText);
        }

        let tl = voice_language(language);

        // try_join_all keeps input order, so pieces concatenate in sequence.
        let fetched = try_join_all(
            pieces
                .iter()
                .enumerate()
                .map(|(idx, piece)| self.fetch_piece(piece, &tl, idx, pieces.len())),
        )
        .await?;

        let mut audio = BytesMut::new();
        for piece in &fetched {
            audio.extend_from_slice(piece);
        }

        if audio.is_empty() {
            return Err(SynthesisError::EmptyAudio);
        }

        tracing::info!(
            language = %tl,
            pieces = pieces.len(),
            bytes = audio.len(),
            "Speech synthesized"
        );

        Ok(SynthesizedSpeech {
            content: audio.freeze(),
            format: AudioFormat::Mp3,
        })
    }
}

/// Chinese voices are selected by region; everything else by primary subtag.
pub fn voice_language(language: &LanguageCode) -> String {
    match (language.primary(), language.region()) {
        ("zh", Some(region)) => format!("zh-{}", region),
        ("zh", None) => "zh-CN".to_string(),
        (primary, _) => primary.to_string(),
    }
}

/// Splits text into pieces of at most `max_chars` characters, preferring
/// whitespace and punctuation boundaries and hard-splitting runs without any
/// (common in CJK text).
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    let mut flush = |current: &mut String, current_len: &mut usize| {
        let trimmed = current.trim();
        if !trimmed.is_empty() {
            pieces.push(trimmed.to_string());
        }
        current.clear();
        *current_len = 0;
    };

    for token in text.split_inclusive(|c: char| c.is_whitespace() || is_break_punctuation(c)) {
        let token_len = token.chars().count();

        if current_len + token_len > max_chars {
            flush(&mut current, &mut current_len);
        }

        if token_len > max_chars {
            for ch in token.chars() {
                if current_len == max_chars {
                    flush(&mut current, &mut current_len);
                }
                current.push(ch);
                current_len += 1;
            }
            continue;
        }

        current.push_str(token);
        current_len += token_len;
    }
    flush(&mut current, &mut current_len);

    pieces
}

fn is_break_punctuation(c: char) -> bool {
    matches!(
        c,
        '.' | ',' | ';' | ':' | '!' | '?' | '。' | '，' | '、' | '；' | '：' | '！' | '？' | '…'
    )
}
