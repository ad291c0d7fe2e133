use bytes::Bytes;

pub const CANONICAL_SAMPLE_RATE: u32 = 16_000;
pub const CANONICAL_CHANNELS: u16 = 1;

const PCM_FORMAT_TAG: u16 = 1;
const PCM_BITS_PER_SAMPLE: u16 = 16;

/// Audio exactly as uploaded by the client.
#[derive(Debug, Clone)]
pub struct AudioBlob {
    bytes: Bytes,
    content_type: Option<String>,
}

impl AudioBlob {
    pub fn new(bytes: impl Into<Bytes>, content_type: Option<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: content_type.filter(|ct| !ct.trim().is_empty()),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Mono 16 kHz signed 16-bit PCM in a WAV container.
///
/// Can only be built through [`NormalizedAudio::from_wav`], which checks the
/// header, so holders may rely on the canonical layout.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedAudio {
    wav: Vec<u8>,
    data_offset: usize,
    data_len: usize,
}

impl NormalizedAudio {
    pub fn from_wav(wav: Vec<u8>) -> Result<Self, WavFormatError> {
        if wav.len() < 12 || &wav[0..4] != b"RIFF" || &wav[8..12] != b"WAVE" {
            return Err(WavFormatError::NotRiffWave);
        }

        let mut format: Option<(u16, u16, u32, u16)> = None;
        let mut offset = 12usize;

        while offset + 8 <= wav.len() {
            let chunk_id = &wav[offset..offset + 4];
            let chunk_size = read_u32(&wav, offset + 4) as usize;
            let body = offset + 8;

            if chunk_id == b"fmt " {
                if chunk_size < 16 || body + 16 > wav.len() {
                    return Err(WavFormatError::Truncated);
                }
                format = Some((
                    read_u16(&wav, body),
                    read_u16(&wav, body + 2),
                    read_u32(&wav, body + 4),
                    read_u16(&wav, body + 14),
                ));
            } else if chunk_id == b"data" {
                let (format_tag, channels, sample_rate, bits) =
                    format.ok_or(WavFormatError::MissingFormat)?;

                if format_tag != PCM_FORMAT_TAG || bits != PCM_BITS_PER_SAMPLE {
                    return Err(WavFormatError::UnsupportedEncoding { format_tag, bits });
                }
                if sample_rate != CANONICAL_SAMPLE_RATE || channels != CANONICAL_CHANNELS {
                    return Err(WavFormatError::UnexpectedLayout {
                        sample_rate,
                        channels,
                    });
                }

                // Streamed WAV headers may carry a placeholder size; trust the bytes we have.
                let data_len = chunk_size.min(wav.len() - body);
                if data_len == 0 {
                    return Err(WavFormatError::EmptyData);
                }

                return Ok(Self {
                    wav,
                    data_offset: body,
                    data_len,
                });
            }

            offset = body
                .saturating_add(chunk_size)
                .saturating_add(chunk_size & 1);
        }

        Err(WavFormatError::MissingData)
    }

    pub fn as_wav(&self) -> &[u8] {
        &self.wav
    }

    pub fn into_wav(self) -> Vec<u8> {
        self.wav
    }

    /// Raw little-endian sample bytes of the data chunk.
    pub fn pcm(&self) -> &[u8] {
        &self.wav[self.data_offset..self.data_offset + self.data_len]
    }

    pub fn sample_rate(&self) -> u32 {
        CANONICAL_SAMPLE_RATE
    }

    pub fn channels(&self) -> u16 {
        CANONICAL_CHANNELS
    }

    pub fn sample_count(&self) -> usize {
        self.data_len / 2
    }

    pub fn duration_secs(&self) -> f32 {
        self.sample_count() as f32 / CANONICAL_SAMPLE_RATE as f32
    }
}

fn read_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WavFormatError {
    #[error("not a RIFF/WAVE container")]
    NotRiffWave,
    #[error("wav header truncated")]
    Truncated,
    #[error("data chunk precedes fmt chunk")]
    MissingFormat,
    #[error("no data chunk")]
    MissingData,
    #[error("data chunk is empty")]
    EmptyData,
    #[error("unsupported encoding: format tag {format_tag}, {bits} bits per sample")]
    UnsupportedEncoding { format_tag: u16, bits: u16 },
    #[error("expected 16000 Hz mono, got {sample_rate} Hz with {channels} channels")]
    UnexpectedLayout { sample_rate: u32, channels: u16 },
}
