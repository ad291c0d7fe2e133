use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::PipelineError;
use crate::domain::AudioBlob;
use crate::infrastructure::observability::preview;
use crate::presentation::state::AppState;

use super::api_error::{ApiError, bad_request};
use super::session_header::SessionHeader;

const AUDIO_FIELD: &str = "audio";

#[derive(Serialize)]
pub struct RecordResponse {
    pub session_id: String,
    pub text: String,
    pub language: String,
}

#[tracing::instrument(skip_all, fields(session_id = %session))]
pub async fn record_handler(
    State(state): State<AppState>,
    SessionHeader(session): SessionHeader,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let blob = loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => return Err(PipelineError::NoAudioProvided.into()),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart");
                return Ok(bad_request(
                    format!("Failed to read multipart: {}", e),
                    "invalid_multipart",
                ));
            }
        };

        if field.name() != Some(AUDIO_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(String::from);
        let data = match field.bytes().await {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read audio bytes");
                return Ok(bad_request(
                    format!("Failed to read audio: {}", e),
                    "invalid_multipart",
                ));
            }
        };

        tracing::debug!(bytes = data.len(), content_type = ?content_type, "Audio received");
        break AudioBlob::new(data, content_type);
    };

    let transcript = state.pipeline.record(session, blob).await?;

    tracing::info!(text = %preview(&transcript.text), "Recording transcribed");

    Ok((
        StatusCode::OK,
        Json(RecordResponse {
            session_id: session.to_string(),
            text: transcript.text,
            language: transcript.language.to_string(),
        }),
    )
        .into_response())
}
