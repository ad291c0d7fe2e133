use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub active_model: Option<String>,
    pub sessions: usize,
}

pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let active_model = state
        .pipeline
        .registry()
        .active_pair()
        .await
        .map(|pair| pair.to_string());
    let sessions = state.pipeline.sessions().len().await;

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            active_model,
            sessions,
        }),
    )
}
