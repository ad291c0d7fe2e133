use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn parse(raw: &str) -> Result<Self, LanguageCodeError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LanguageCodeError::Empty);
        }

        let mut parts = trimmed.split(['-', '_']);
        let primary = parts.next().unwrap_or_default();
        let region = parts.next();

        if parts.next().is_some()
            || !(2..=3).contains(&primary.len())
            || !primary.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(LanguageCodeError::Invalid(trimmed.to_string()));
        }

        let normalized = match region {
            None => primary.to_ascii_lowercase(),
            Some(r)
                if (2..=4).contains(&r.len()) && r.chars().all(|c| c.is_ascii_alphanumeric()) =>
            {
                format!("{}-{}", primary.to_ascii_lowercase(), r.to_ascii_uppercase())
            }
            Some(_) => return Err(LanguageCodeError::Invalid(trimmed.to_string())),
        };

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn primary(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }

    pub fn region(&self) -> Option<&str> {
        self.0.split_once('-').map(|(_, region)| region)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = LanguageCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LanguageCodeError {
    #[error("language code is empty")]
    Empty,
    #[error("invalid language code: {0}")]
    Invalid(String),
}
