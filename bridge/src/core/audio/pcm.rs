//! 16-bit PCM sample buffers and the float to integer conversion shared by
//! every synthesis path.

/// Channel count of every buffer produced by the bridge
pub const MONO: u16 = 1;

/// Full-scale magnitude used when converting normalized floats to `i16`
const I16_FULL_SCALE: f32 = i16::MAX as f32;

/// Convert a single normalized sample to signed 16-bit PCM.
///
/// The input is clamped to [-1.0, 1.0], scaled by 32767 and rounded to the
/// nearest integer. NaN maps to silence.
#[inline]
pub fn f32_to_i16(sample: f32) -> i16 {
    if sample.is_nan() {
        return 0;
    }
    (sample.clamp(-1.0, 1.0) * I16_FULL_SCALE).round() as i16
}

/// Ordered mono 16-bit samples tagged with their sample rate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmBuffer {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl PcmBuffer {
    /// Wrap already-converted samples
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Build a buffer from floating-point samples in an arbitrary range
    pub fn from_f32(samples: &[f32], sample_rate: u32) -> Self {
        Self::new(samples.iter().copied().map(f32_to_i16).collect(), sample_rate)
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        MONO
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Playback duration in seconds
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}
