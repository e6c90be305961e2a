use serde::{Deserialize, Serialize};

/// Sample rate used when a request does not specify one
pub const DEFAULT_SAMPLE_RATE: u32 = 24000;

/// Highest sample rate accepted from clients
pub const MAX_SAMPLE_RATE: u32 = 384_000;

pub const DEFAULT_LANGUAGE: &str = "es-ES";
pub const DEFAULT_RATE: f32 = 0.5;
pub const DEFAULT_PITCH: f32 = 1.0;

/// Body of `POST /synthesize`.
///
/// Only `text` is required. Optional fields may be omitted or sent as `null`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct SynthesisRequest {
    /// Text to synthesize
    pub text: String,
    /// Output sample rate in Hz (placeholder mode only)
    #[serde(default)]
    pub sample_rate: Option<i64>,
    /// Voice identifier
    #[serde(default)]
    pub voice: Option<String>,
    /// Locale tag, e.g. `es-ES`
    #[serde(default)]
    pub language: Option<String>,
    /// Speaking-rate multiplier
    #[serde(default)]
    pub rate: Option<f32>,
    /// Pitch multiplier
    #[serde(default)]
    pub pitch: Option<f32>,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_sample_rate(mut self, sample_rate: i64) -> Self {
        self.sample_rate = Some(sample_rate);
        self
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    /// Whether the text has at least one non-whitespace character
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Text length in Unicode scalar values
    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn voice(&self) -> &str {
        self.voice.as_deref().unwrap_or(super::model::REQUEST_DEFAULT_VOICE)
    }

    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }

    pub fn rate(&self) -> f32 {
        self.rate.unwrap_or(DEFAULT_RATE)
    }

    pub fn pitch(&self) -> f32 {
        self.pitch.unwrap_or(DEFAULT_PITCH)
    }
}
