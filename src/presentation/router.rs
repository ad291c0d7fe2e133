use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    audio_handler, health_handler, record_handler, reset_session_handler, session_echo_middleware,
    session_handler, set_language_handler, translate_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = DefaultBodyLimit::max(state.settings.pipeline.max_upload_bytes());

    let api = Router::new()
        .route("/api/v1/session/language", post(set_language_handler))
        .route("/api/v1/record", post(record_handler))
        .route(
            "/api/v1/translate",
            post(translate_handler).get(translate_handler),
        )
        .route("/api/v1/audio/{name}", get(audio_handler))
        .route(
            "/api/v1/session",
            get(session_handler).delete(reset_session_handler),
        );

    // Paths the browser client used before the versioned API existed.
    let legacy = Router::new()
        .route("/set_language", post(set_language_handler))
        .route("/record", post(record_handler))
        .route("/translate", post(translate_handler).get(translate_handler));

    Router::new()
        .route("/health", get(health_handler))
        .merge(api)
        .merge(legacy)
        .layer(body_limit)
        .layer(middleware::from_fn(session_echo_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
