use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeDelta, Utc};
use tokio::sync::{Mutex, RwLock};

use crate::domain::{LanguagePair, Session, SessionId};

pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<Session>>>>,
    default_pair: Option<LanguagePair>,
}

impl SessionStore {
    pub fn new(default_pair: Option<LanguagePair>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            default_pair,
        }
    }

    pub fn default_pair(&self) -> Option<&LanguagePair> {
        self.default_pair.as_ref()
    }

    pub async fn get(&self, id: SessionId) -> Option<Arc<Mutex<Session>>> {
        self.sessions.read().await.get(&id).cloned()
    }

    pub async fn get_or_create(&self, id: SessionId) -> Arc<Mutex<Session>> {
        if let Some(session) = self.get(id).await {
            return session;
        }

        let mut sessions = self.sessions.write().await;
        Arc::clone(sessions.entry(id).or_insert_with(|| {
            tracing::debug!(session_id = %id, "Session created");
            Arc::new(Mutex::new(Session::new(id, self.default_pair.clone())))
        }))
    }

    pub async fn remove(&self, id: SessionId) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Drops sessions idle for longer than `max_idle`. Sessions a request has
    /// checked out, locked or not, are skipped.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let max_idle = TimeDelta::from_std(max_idle).unwrap_or(TimeDelta::MAX);
        let now = Utc::now();

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| {
            if Arc::strong_count(session) > 1 {
                return true;
            }
            match session.try_lock() {
                Ok(session) => now - session.last_activity() <= max_idle,
                Err(_) => true,
            }
        });
        let evicted = before - sessions.len();

        if evicted > 0 {
            tracing::info!(evicted, remaining = sessions.len(), "Evicted idle sessions");
        }
        evicted
    }
}
