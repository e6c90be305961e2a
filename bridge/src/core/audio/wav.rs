//! RIFF/WAVE container encoding for 16-bit mono PCM.

use std::io::Cursor;

use thiserror::Error;

use super::pcm::PcmBuffer;

/// Bit depth of every encoded container
pub const BITS_PER_SAMPLE: u16 = 16;

/// Size of the canonical RIFF + fmt + data chunk headers
pub const WAV_HEADER_LEN: usize = 44;

/// MIME type of the encoded container
pub const WAV_CONTENT_TYPE: &str = "audio/wav";

#[derive(Debug, Error)]
pub enum WavError {
    #[error("Invalid sample rate: {0}")]
    InvalidSampleRate(u32),

    #[error("WAV encoding failed: {0}")]
    Encoding(#[from] hound::Error),
}

/// A complete, self-describing WAV file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavBytes(Vec<u8>);

impl WavBytes {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for WavBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<WavBytes> for Vec<u8> {
    fn from(wav: WavBytes) -> Self {
        wav.0
    }
}

/// Encode a PCM buffer as a mono 16-bit WAV file.
///
/// The whole buffer is written at once; on failure nothing is returned.
pub fn encode(pcm: &PcmBuffer) -> Result<WavBytes, WavError> {
    if pcm.sample_rate() == 0 {
        return Err(WavError::InvalidSampleRate(0));
    }

    let spec = hound::WavSpec {
        channels: pcm.channels(),
        sample_rate: pcm.sample_rate(),
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::with_capacity(WAV_HEADER_LEN + pcm.len() * 2));
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
        for &sample in pcm.samples() {
            writer.write_sample(sample)?;
        }
        // Rewrites the RIFF and data chunk sizes
        writer.finalize()?;
    }

    Ok(WavBytes(cursor.into_inner()))
}
