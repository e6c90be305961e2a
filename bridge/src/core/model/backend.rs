use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a speech model backend while loading or generating
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BackendError {
    #[error("Model load failed: {0}")]
    LoadFailed(String),

    #[error("Audio generation failed: {0}")]
    GenerationFailed(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// A loaded text-to-speech model.
///
/// Implementations return raw floating-point samples in whatever range the
/// model produces; the adapter takes care of clamping and conversion.
#[async_trait]
pub trait SpeechModel: Send + Sync {
    /// Identifier the model was loaded with
    fn model_id(&self) -> &str;

    /// Synthesize `text` with the given voice
    async fn generate(&self, text: &str, voice: &str) -> BackendResult<Vec<f32>>;
}

/// Constructs [`SpeechModel`] handles.
///
/// The adapter calls `load` at most once per successful construction; a
/// loader never needs to cache on its own.
#[async_trait]
pub trait ModelLoader: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Load the model identified by `model_id`
    async fn load(&self, model_id: &str) -> BackendResult<Arc<dyn SpeechModel>>;
}
