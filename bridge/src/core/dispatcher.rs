//! Synthesis dispatch
//!
//! Validates incoming requests and routes them either to the placeholder tone
//! generator or to the real speech model. Both paths end in the same WAV
//! encoder so clients always receive a mono 16-bit container.

use std::sync::Arc;

use tracing::{debug, info};

use super::audio::{self, ToneConfig, WavBytes};
use super::model::ModelAdapter;
use super::request::{DEFAULT_SAMPLE_RATE, MAX_SAMPLE_RATE, SynthesisRequest};
use crate::errors::synthesis_error::{SynthesisError, SynthesisResult};

/// Detail returned for empty or whitespace-only text
pub const TEXT_REQUIRED_DETAIL: &str = "Text is required";

/// Longest placeholder clip the configuration may ask for, in seconds
pub const MAX_PLACEHOLDER_SECS: f64 = 60.0;

/// Placeholder clip length heuristic: `min(max, base + per_char * len(text))`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaceholderConfig {
    /// Duration of an empty clip in seconds
    pub base_secs: f64,
    /// Seconds added per character of input text
    pub secs_per_char: f64,
    /// Upper bound on the clip duration in seconds
    pub max_secs: f64,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            base_secs: 0.5,
            secs_per_char: 0.05,
            max_secs: 2.5,
        }
    }
}

impl PlaceholderConfig {
    /// Clip duration for a text of `chars` characters
    pub fn duration_secs(&self, chars: usize) -> f64 {
        self.max_secs
            .min(self.base_secs + self.secs_per_char * chars as f64)
    }
}

/// Dispatcher settings
#[derive(Debug, Clone, PartialEq)]
pub struct DispatcherConfig {
    /// Serve the placeholder tone instead of calling the real model
    pub mock_audio: bool,
    /// Sample rate used when the request does not specify one
    pub default_sample_rate: u32,
    pub placeholder: PlaceholderConfig,
    pub tone: ToneConfig,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            mock_audio: true,
            default_sample_rate: DEFAULT_SAMPLE_RATE,
            placeholder: PlaceholderConfig::default(),
            tone: ToneConfig::default(),
        }
    }
}

/// Entry point of the synthesis path
pub struct Dispatcher {
    config: DispatcherConfig,
    model: Arc<ModelAdapter>,
}

impl Dispatcher {
    pub fn new(config: DispatcherConfig, model: Arc<ModelAdapter>) -> Self {
        Self { config, model }
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    pub fn model(&self) -> &Arc<ModelAdapter> {
        &self.model
    }

    pub fn is_placeholder_mode(&self) -> bool {
        self.config.mock_audio
    }

    /// Validate a request before either synthesis path runs.
    ///
    /// Text is the only constraint shared by both modes.
    pub fn validate(&self, request: &SynthesisRequest) -> SynthesisResult<()> {
        if !request.has_text() {
            return Err(SynthesisError::InvalidRequest(
                TEXT_REQUIRED_DETAIL.to_string(),
            ));
        }
        Ok(())
    }

    /// Output rate for placeholder audio; absent or zero means the default.
    pub fn placeholder_sample_rate(&self, request: &SynthesisRequest) -> SynthesisResult<u32> {
        match request.sample_rate {
            None | Some(0) => Ok(self.config.default_sample_rate),
            Some(rate) if (1..=MAX_SAMPLE_RATE as i64).contains(&rate) => Ok(rate as u32),
            Some(rate) => Err(SynthesisError::InvalidRequest(format!(
                "sample_rate must be between 1 and {MAX_SAMPLE_RATE}, got {rate}"
            ))),
        }
    }

    /// Handle one synthesis request end to end.
    ///
    /// # Errors
    /// - `InvalidRequest` for empty text, or an out-of-range placeholder sample rate
    /// - `BackendUnavailable` when real synthesis is requested without a backend
    /// - `SynthesisFailure` when the backend or the encoder fails
    pub async fn handle(&self, request: &SynthesisRequest) -> SynthesisResult<WavBytes> {
        self.validate(request)?;

        debug!(
            "Synthesis options: language={}, rate={}, pitch={}",
            request.language(),
            request.rate(),
            request.pitch()
        );

        if self.config.mock_audio {
            self.synthesize_placeholder(request)
        } else {
            self.synthesize_real(request).await
        }
    }

    fn synthesize_placeholder(&self, request: &SynthesisRequest) -> SynthesisResult<WavBytes> {
        let sample_rate = self.placeholder_sample_rate(request)?;
        let chars = request.text_len();
        let duration = self.config.placeholder.duration_secs(chars);

        info!(
            "Placeholder synthesis: chars={}, duration={:.2}s, sample_rate={}",
            chars, duration, sample_rate
        );

        let pcm = audio::synthesize(sample_rate, duration, &self.config.tone);
        Ok(audio::encode(&pcm)?)
    }

    async fn synthesize_real(&self, request: &SynthesisRequest) -> SynthesisResult<WavBytes> {
        info!(
            "Model synthesis: chars={}, voice={}",
            request.text_len(),
            request.voice()
        );

        let pcm = self
            .model
            .generate(&request.text, request.voice.as_deref())
            .await?;
        Ok(audio::encode(&pcm)?)
    }
}
