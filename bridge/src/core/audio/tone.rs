//! Placeholder tone synthesis.
//!
//! Produces a sine tone shaped by a linear fade-in/fade-out envelope so the
//! clip starts and ends at zero amplitude (no audible clicks). Output is fully
//! deterministic for a given set of inputs.

use std::f64::consts::PI;

use super::pcm::{PcmBuffer, f32_to_i16};

/// Length of the fade-in and fade-out ramps in seconds
pub const FADE_SECS: f64 = 0.03;

/// Default tone frequency in Hz
pub const DEFAULT_FREQUENCY_HZ: f64 = 440.0;

/// Default peak amplitude relative to full scale
pub const DEFAULT_VOLUME: f64 = 0.2;

/// Pitch and loudness of the placeholder tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneConfig {
    /// Tone frequency in Hz
    pub frequency_hz: f64,
    /// Peak amplitude in [0.0, 1.0]
    pub volume: f64,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            volume: DEFAULT_VOLUME,
        }
    }
}

/// Number of samples in a clip of `duration_secs` at `sample_rate`
pub fn sample_count(sample_rate: u32, duration_secs: f64) -> usize {
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return 0;
    }
    (duration_secs * sample_rate as f64).round() as usize
}

/// Fade envelope at time `t` for a clip lasting `duration_secs`.
///
/// `min(1, t / 0.03, (duration - t) / 0.03)` clamped to [0, 1].
pub fn envelope(t: f64, duration_secs: f64) -> f64 {
    let fade_in = t / FADE_SECS;
    let fade_out = (duration_secs - t) / FADE_SECS;
    fade_in.min(fade_out).clamp(0.0, 1.0)
}

/// Synthesize a faded sine tone as 16-bit mono PCM.
pub fn synthesize(sample_rate: u32, duration_secs: f64, tone: &ToneConfig) -> PcmBuffer {
    let frames = sample_count(sample_rate, duration_secs);
    let step = 2.0 * PI * tone.frequency_hz;

    let samples = (0..frames)
        .map(|n| {
            let t = n as f64 / sample_rate as f64;
            let value = tone.volume * envelope(t, duration_secs) * (step * t).sin();
            f32_to_i16(value as f32)
        })
        .collect();

    PcmBuffer::new(samples, sample_rate)
}
