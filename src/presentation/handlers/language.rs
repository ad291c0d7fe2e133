use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::services::PipelineError;
use crate::domain::LanguagePair;
use crate::presentation::state::AppState;

use super::api_error::ApiError;
use super::session_header::SessionHeader;

#[derive(Debug, Deserialize)]
pub struct SetLanguageRequest {
    pub source: String,
    pub target: String,
}

#[derive(Serialize)]
pub struct SetLanguageResponse {
    pub session_id: String,
    pub source: String,
    pub target: String,
    pub model: String,
    pub reloaded: bool,
    pub transcript_retained: bool,
}

#[tracing::instrument(skip_all, fields(session_id = %session))]
pub async fn set_language_handler(
    State(state): State<AppState>,
    SessionHeader(session): SessionHeader,
    Json(request): Json<SetLanguageRequest>,
) -> Result<Response, ApiError> {
    let pair = LanguagePair::parse(&request.source, &request.target).map_err(PipelineError::from)?;
    let outcome = state.pipeline.configure(session, pair).await?;

    Ok((
        StatusCode::OK,
        Json(SetLanguageResponse {
            session_id: session.to_string(),
            source: outcome.pair.source().to_string(),
            target: outcome.pair.target().to_string(),
            model: outcome.model_id,
            reloaded: outcome.reloaded,
            transcript_retained: outcome.transcript_retained,
        }),
    )
        .into_response())
}
