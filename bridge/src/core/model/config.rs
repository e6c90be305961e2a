//! Configuration for the real speech model backend.

use std::time::Duration;

/// Published KittenTTS model loaded when no override is configured
pub const DEFAULT_MODEL_ID: &str = "KittenML/kitten-tts-nano-0.1";

/// Voice used when a request does not pick one
pub const DEFAULT_VOICE: &str = "expr-voice-2-f";

/// Voice value requests carry when the client left it at its default
pub const REQUEST_DEFAULT_VOICE: &str = "default";

/// KittenTTS always produces 24 kHz audio
pub const KITTEN_SAMPLE_RATE: u32 = 24000;

/// Default timeout for a single backend call
pub const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 60;

/// Settings for the real synthesis backend
#[derive(Clone)]
pub struct ModelConfig {
    /// Model identifier passed to the backend on load
    pub model_id: String,
    /// Voice used when the request does not specify one
    pub default_voice: String,
    /// Base URL of the inference server; `None` means no backend is installed
    pub backend_url: Option<String>,
    /// Optional bearer token for the inference server
    pub api_key: Option<String>,
    /// Timeout applied to each backend HTTP call
    pub timeout: Duration,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            default_voice: DEFAULT_VOICE.to_string(),
            backend_url: None,
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_BACKEND_TIMEOUT_SECS),
        }
    }
}

impl std::fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelConfig")
            .field("model_id", &self.model_id)
            .field("default_voice", &self.default_voice)
            .field("backend_url", &self.backend_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Drop for ModelConfig {
    fn drop(&mut self) {
        use zeroize::Zeroize;

        if let Some(ref mut key) = self.api_key {
            key.zeroize();
        }
    }
}

impl ModelConfig {
    /// Point the adapter at an inference server.
    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = Some(url.into());
        self
    }

    /// Bearer token sent with every backend call.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Pick the voice for a request.
    ///
    /// Missing, blank and the request-level `"default"` placeholder all map to
    /// the configured default voice.
    pub fn resolve_voice<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        match requested.map(str::trim) {
            Some(voice) if !voice.is_empty() && voice != REQUEST_DEFAULT_VOICE => voice,
            _ => &self.default_voice,
        }
    }
}
