//! Audio primitives used by both synthesis paths
//!
//! - `pcm` - 16-bit PCM buffers and the shared float to `i16` conversion
//! - `tone` - placeholder sine tone with fade-in/fade-out shaping
//! - `wav` - RIFF/WAVE container encoding

pub mod pcm;
pub mod tone;
pub mod wav;

pub use pcm::{MONO, PcmBuffer, f32_to_i16};
pub use tone::{FADE_SECS, ToneConfig, synthesize};
pub use wav::{WAV_CONTENT_TYPE, WAV_HEADER_LEN, WavBytes, WavError, encode};
