use std::sync::Arc;

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use tracing::info;

use crate::core::audio::WAV_CONTENT_TYPE;
use crate::core::request::SynthesisRequest;
use crate::errors::synthesis_error::SynthesisResult;
use crate::state::AppState;

/// Synthesize text into a mono 16-bit WAV file
///
/// Returns `audio/wav` bytes on success. Failures are reported as
/// `{"detail": "..."}` with status 400, 501 or 500.
pub async fn synthesize_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SynthesisRequest>,
) -> SynthesisResult<Response> {
    info!(
        "Synthesize request received - text length: {}, placeholder: {}",
        request.text_len(),
        state.dispatcher.is_placeholder_mode()
    );

    let wav = state.dispatcher.handle(&request).await?;

    info!("Synthesis successful - {} bytes", wav.len());

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, WAV_CONTENT_TYPE)],
        wav.into_inner(),
    )
        .into_response())
}
