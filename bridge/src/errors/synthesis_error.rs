use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::core::audio::WavError;
use crate::core::model::BackendError;

/// Detail returned when real synthesis is requested but no backend is installed
pub const BACKEND_UNAVAILABLE_DETAIL: &str =
    "KittenTTS not installed. Enable MOCK_AUDIO=1 or install KittenTTS.";

/// Failures surfaced by the synthesis path.
///
/// Every variant maps to a distinct HTTP status; the display string is the
/// human-readable `detail` sent to the client.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SynthesisError {
    /// Client sent unusable input (empty text, bad sample rate)
    #[error("{0}")]
    InvalidRequest(String),

    /// Real synthesis requested but the backend capability is missing
    #[error("{0}")]
    BackendUnavailable(String),

    /// The backend failed while loading or generating, or encoding failed
    #[error("KittenTTS synthesis error: {0}")]
    SynthesisFailure(String),
}

impl SynthesisError {
    pub fn backend_unavailable() -> Self {
        SynthesisError::BackendUnavailable(BACKEND_UNAVAILABLE_DETAIL.to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            SynthesisError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            SynthesisError::BackendUnavailable(_) => StatusCode::NOT_IMPLEMENTED,
            SynthesisError::SynthesisFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<BackendError> for SynthesisError {
    fn from(err: BackendError) -> Self {
        SynthesisError::SynthesisFailure(err.to_string())
    }
}

impl From<WavError> for SynthesisError {
    fn from(err: WavError) -> Self {
        SynthesisError::SynthesisFailure(err.to_string())
    }
}

impl IntoResponse for SynthesisError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            SynthesisError::InvalidRequest(msg) => tracing::warn!("Bad request: {}", msg),
            SynthesisError::BackendUnavailable(msg) => {
                tracing::warn!("Backend unavailable: {}", msg)
            }
            SynthesisError::SynthesisFailure(msg) => tracing::error!("Synthesis failed: {}", msg),
        }

        let body = Json(json!({
            "detail": self.to_string()
        }));

        (status, body).into_response()
    }
}

/// Result type for synthesis operations
pub type SynthesisResult<T> = Result<T, SynthesisError>;
