use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::services::SessionSnapshot;
use crate::presentation::state::AppState;

use super::session_header::SessionHeader;

#[derive(Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub state: String,
    pub source: Option<String>,
    pub target: Option<String>,
    pub transcript: Option<String>,
    pub created_at: String,
    pub last_activity: String,
}

impl From<SessionSnapshot> for SessionResponse {
    fn from(snapshot: SessionSnapshot) -> Self {
        Self {
            session_id: snapshot.id.to_string(),
            state: snapshot.state.to_string(),
            source: snapshot.pair.as_ref().map(|p| p.source().to_string()),
            target: snapshot.pair.as_ref().map(|p| p.target().to_string()),
            transcript: snapshot.transcript.map(|t| t.text),
            created_at: snapshot.created_at.to_rfc3339(),
            last_activity: snapshot.last_activity.to_rfc3339(),
        }
    }
}

pub async fn session_handler(
    State(state): State<AppState>,
    SessionHeader(session): SessionHeader,
) -> impl IntoResponse {
    let snapshot = state.pipeline.snapshot(session).await;
    (StatusCode::OK, Json(SessionResponse::from(snapshot)))
}

#[tracing::instrument(skip_all, fields(session_id = %session))]
pub async fn reset_session_handler(
    State(state): State<AppState>,
    SessionHeader(session): SessionHeader,
) -> impl IntoResponse {
    let snapshot = state.pipeline.reset(session).await;
    tracing::info!("Session reset");
    (StatusCode::OK, Json(SessionResponse::from(snapshot)))
}
