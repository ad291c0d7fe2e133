use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::language_pair::LanguagePair;
use super::session_id::SessionId;
use super::transcript::TranscriptionResult;

/// What happens to a pending transcript when the language pair changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconfigurePolicy {
    KeepTranscript,
    ClearTranscript,
    /// Keep it only while the source language stays the same, so a recording
    /// can be translated into several targets without re-recording.
    #[default]
    ClearOnSourceChange,
}

/// Position of a session in the configure -> record -> translate sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Configured {
        pair: LanguagePair,
    },
    Transcribed {
        pair: LanguagePair,
        transcript: TranscriptionResult,
    },
}

impl SessionState {
    pub fn initial(default_pair: Option<LanguagePair>) -> Self {
        match default_pair {
            Some(pair) => Self::Configured { pair },
            None => Self::Idle,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Configured { .. } => "configured",
            Self::Transcribed { .. } => "transcribed",
        }
    }

    pub fn pair(&self) -> Option<&LanguagePair> {
        match self {
            Self::Idle => None,
            Self::Configured { pair } | Self::Transcribed { pair, .. } => Some(pair),
        }
    }

    pub fn transcript(&self) -> Option<&TranscriptionResult> {
        match self {
            Self::Transcribed { transcript, .. } => Some(transcript),
            _ => None,
        }
    }

    /// Returns the next state and whether a pending transcript was retained.
    pub fn configure(&self, pair: LanguagePair, policy: ReconfigurePolicy) -> (Self, bool) {
        match self {
            Self::Transcribed {
                pair: previous,
                transcript,
            } => {
                let keep = match policy {
                    ReconfigurePolicy::KeepTranscript => true,
                    ReconfigurePolicy::ClearTranscript => false,
                    ReconfigurePolicy::ClearOnSourceChange => previous.source() == pair.source(),
                };
                if keep {
                    (
                        Self::Transcribed {
                            pair,
                            transcript: transcript.clone(),
                        },
                        true,
                    )
                } else {
                    (Self::Configured { pair }, false)
                }
            }
            Self::Idle | Self::Configured { .. } => (Self::Configured { pair }, false),
        }
    }

    pub fn recorded(&self, transcript: TranscriptionResult) -> Result<Self, SessionError> {
        let pair = self.pair().ok_or(SessionError::NotConfigured)?;
        Ok(Self::Transcribed {
            pair: pair.clone(),
            transcript,
        })
    }

    /// A failed recording never leaves a stale transcript behind.
    pub fn recording_failed(&self) -> Self {
        match self {
            Self::Idle => Self::Idle,
            Self::Configured { pair } | Self::Transcribed { pair, .. } => {
                Self::Configured { pair: pair.clone() }
            }
        }
    }

    pub fn pending_translation(&self) -> Result<(&LanguagePair, &TranscriptionResult), SessionError> {
        match self {
            Self::Transcribed { pair, transcript } => Ok((pair, transcript)),
            Self::Idle | Self::Configured { .. } => Err(SessionError::NoTranscript),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    state: SessionState,
    created_at: DateTime<Utc>,
    last_activity: DateTime<Utc>,
}

impl Session {
    pub fn new(id: SessionId, default_pair: Option<LanguagePair>) -> Self {
        let now = Utc::now();
        Self {
            id,
            state: SessionState::initial(default_pair),
            created_at: now,
            last_activity: now,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    pub fn active_pair(&self) -> Result<LanguagePair, SessionError> {
        self.state.pair().cloned().ok_or(SessionError::NotConfigured)
    }

    pub fn configure(&mut self, pair: LanguagePair, policy: ReconfigurePolicy) -> bool {
        let (next, retained) = self.state.configure(pair, policy);
        self.transition(next);
        retained
    }

    pub fn record_succeeded(&mut self, transcript: TranscriptionResult) -> Result<(), SessionError> {
        let next = self.state.recorded(transcript)?;
        self.transition(next);
        Ok(())
    }

    pub fn record_failed(&mut self) {
        let next = self.state.recording_failed();
        self.transition(next);
    }

    pub fn pending_translation(&self) -> Result<(LanguagePair, TranscriptionResult), SessionError> {
        self.state
            .pending_translation()
            .map(|(pair, transcript)| (pair.clone(), transcript.clone()))
    }

    pub fn reset(&mut self, default_pair: Option<LanguagePair>) {
        self.transition(SessionState::initial(default_pair));
    }

    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    fn transition(&mut self, next: SessionState) {
        tracing::debug!(
            session_id = %self.id,
            from = self.state.name(),
            to = next.name(),
            "Session state transition"
        );
        self.state = next;
        self.touch();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("no language pair configured for this session")]
    NotConfigured,
    #[error("no transcript available, record audio first")]
    NoTranscript,
}
