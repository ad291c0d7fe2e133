use super::language_code::LanguageCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionResult {
    pub text: String,
    pub language: LanguageCode,
}

impl TranscriptionResult {
    pub fn new(text: impl Into<String>, language: LanguageCode) -> Self {
        Self {
            text: text.into(),
            language,
        }
    }
}
