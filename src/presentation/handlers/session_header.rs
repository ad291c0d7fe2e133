use axum::extract::{FromRequestParts, Request};
use axum::http::HeaderValue;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::domain::SessionId;
use crate::infrastructure::observability::SESSION_ID_HEADER;

use super::api_error::bad_request;

#[derive(Debug, Clone, Copy)]
pub struct SessionHeader(pub SessionId);

impl<S> FromRequestParts<S> for SessionHeader
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(raw) = parts.headers.get(SESSION_ID_HEADER) else {
            return Ok(Self(SessionId::shared()));
        };

        raw.to_str()
            .ok()
            .and_then(|value| SessionId::parse(value.trim()).ok())
            .map(Self)
            .ok_or_else(|| {
                bad_request(
                    format!("{} must be a UUID", SESSION_ID_HEADER),
                    "invalid_session_id",
                )
                .into_response()
            })
    }
}

pub async fn session_echo_middleware(request: Request, next: Next) -> Response {
    let session = request
        .headers()
        .get(SESSION_ID_HEADER)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("00000000-0000-0000-0000-000000000000"));

    let mut response = next.run(request).await;
    response.headers_mut().insert(SESSION_ID_HEADER, session);
    response
}
