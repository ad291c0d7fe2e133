use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::presentation::state::AppState;

use super::api_error::ApiError;

#[tracing::instrument(skip(state))]
pub async fn audio_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let (name, content) = state.pipeline.fetch_audio(&name).await?;

    tracing::debug!(name = %name, bytes = content.len(), "Serving synthesized audio");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, name.format().content_type()),
            (header::CACHE_CONTROL, "public, max-age=31536000, immutable"),
        ],
        content,
    )
        .into_response())
}
