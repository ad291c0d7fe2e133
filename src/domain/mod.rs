mod artifact;
mod audio;
mod audio_name;
mod language_code;
mod language_pair;
mod session;
mod session_id;
mod transcript;

pub use artifact::{AudioArtifact, AudioOutcome, TranslationArtifact};
pub use audio::{AudioBlob, CANONICAL_CHANNELS, CANONICAL_SAMPLE_RATE, NormalizedAudio, WavFormatError};
pub use audio_name::{AudioFormat, AudioName, AudioNameError};
pub use language_code::{LanguageCode, LanguageCodeError};
pub use language_pair::{LanguagePair, LanguagePairError};
pub use session::{ReconfigurePolicy, Session, SessionError, SessionState};
pub use session_id::SessionId;
pub use transcript::TranscriptionResult;
