mod api_error;
mod audio;
mod health;
mod language;
mod record;
mod session;
mod session_header;
mod translate;

pub use api_error::{ApiError, ErrorResponse, status_for};
pub use audio::audio_handler;
pub use health::health_handler;
pub use language::{SetLanguageRequest, set_language_handler};
pub use record::record_handler;
pub use session::{SessionResponse, reset_session_handler, session_handler};
pub use session_header::{SessionHeader, session_echo_middleware};
pub use translate::{TranslateResponse, translate_handler};
