use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::PipelineError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub kind: String,
}

#[derive(Debug)]
pub struct ApiError(pub PipelineError);

impl From<PipelineError> for ApiError {
    fn from(e: PipelineError) -> Self {
        Self(e)
    }
}

pub fn status_for(error: &PipelineError) -> StatusCode {
    match error {
        PipelineError::InvalidLanguage(_)
        | PipelineError::NoAudioProvided
        | PipelineError::ModelUnavailable { .. }
        | PipelineError::NoTranscriptAvailable => StatusCode::BAD_REQUEST,
        PipelineError::TranscodeFailed(_) | PipelineError::NoSpeechDetected => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        PipelineError::SessionNotConfigured | PipelineError::ModelNotReady { .. } => {
            StatusCode::CONFLICT
        }
        PipelineError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        PipelineError::TranslationFailed(_) => StatusCode::BAD_GATEWAY,
        PipelineError::AudioNotFound(_) => StatusCode::NOT_FOUND,
        PipelineError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);

        if status.is_server_error() {
            tracing::error!(error = %self.0, code = self.0.code(), "Request failed");
        } else {
            tracing::warn!(error = %self.0, code = self.0.code(), "Request rejected");
        }

        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
                code: self.0.code().to_string(),
                kind: self.0.kind().as_str().to_string(),
            }),
        )
            .into_response()
    }
}

pub(super) fn bad_request(message: impl Into<String>, code: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
            code: code.to_string(),
            kind: "client_input".to_string(),
        }),
    )
        .into_response()
}
