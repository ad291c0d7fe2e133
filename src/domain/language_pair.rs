use std::fmt;

use super::language_code::{LanguageCode, LanguageCodeError};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguagePair {
    source: LanguageCode,
    target: LanguageCode,
}

impl LanguagePair {
    pub fn new(source: LanguageCode, target: LanguageCode) -> Result<Self, LanguagePairError> {
        if source.primary() == target.primary() {
            return Err(LanguagePairError::SameLanguage(source.to_string()));
        }
        Ok(Self { source, target })
    }

    pub fn parse(source: &str, target: &str) -> Result<Self, LanguagePairError> {
        Self::new(LanguageCode::parse(source)?, LanguageCode::parse(target)?)
    }

    pub fn source(&self) -> &LanguageCode {
        &self.source
    }

    pub fn target(&self) -> &LanguageCode {
        &self.target
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.source, self.target)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LanguagePairError {
    #[error(transparent)]
    Code(#[from] LanguageCodeError),
    #[error("source and target language are both {0}")]
    SameLanguage(String),
}
