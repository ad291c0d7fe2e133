use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::presentation::state::AppState;

use super::api_error::ApiError;
use super::session_header::SessionHeader;

#[derive(Serialize)]
pub struct TranslateResponse {
    pub session_id: String,
    pub original_text: String,
    pub source_language: String,
    pub translated_text: String,
    pub target_language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_error: Option<String>,
}

#[tracing::instrument(skip_all, fields(session_id = %session))]
pub async fn translate_handler(
    State(state): State<AppState>,
    SessionHeader(session): SessionHeader,
) -> Result<Response, ApiError> {
    let artifact = state.pipeline.translate(session).await?;

    let response = TranslateResponse {
        session_id: session.to_string(),
        audio_url: artifact.audio_url().map(String::from),
        audio_error: artifact.audio_error().map(String::from),
        original_text: artifact.original.text,
        source_language: artifact.original.language.to_string(),
        translated_text: artifact.translated_text,
        target_language: artifact.target_language.to_string(),
    };

    Ok((StatusCode::OK, Json(response)).into_response())
}
