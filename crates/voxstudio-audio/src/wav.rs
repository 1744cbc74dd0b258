//! WAV container encoding
//!
//! Serializes a sample buffer into the canonical 44-byte-header RIFF/WAVE
//! layout with uncompressed 16-bit PCM data. The header is written by hand:
//! its exact byte layout and the asymmetric quantization scale are the
//! contract this module exists to uphold.

use crate::buffer::SampleBuffer;

pub const WAV_MIME_TYPE: &str = "audio/wav";

const HEADER_LEN: usize = 44;
const BYTES_PER_SAMPLE: u32 = 2;

/// A fully-encoded WAV file plus its declared MIME type.
///
/// Terminal artifact: written to disk or offered for download, never fed
/// back into the pipeline.
#[derive(Debug, Clone)]
pub struct EncodedWav {
    data: Vec<u8>,
}

impl EncodedWav {
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn mime_type(&self) -> &'static str {
        WAV_MIME_TYPE
    }

    /// Suggested download filename: `<prefix>-<unix-timestamp-ms>.wav`.
    pub fn suggested_filename(&self, prefix: &str, timestamp_ms: i64) -> String {
        format!("{prefix}-{timestamp_ms}.wav")
    }
}

/// Encode a buffer as uncompressed 16-bit PCM WAV.
///
/// Always succeeds for a well-formed buffer; an empty buffer yields the
/// 44-byte header with a zero-length data chunk. The whole file is built in
/// memory so no partially-written artifact can ever be observed.
pub fn encode_wav(buffer: &SampleBuffer) -> EncodedWav {
    let channel_count = buffer.channel_count() as u32;
    let sample_rate = buffer.sample_rate();
    let frame_count = buffer.frame_count();

    let block_align = channel_count * BYTES_PER_SAMPLE;
    let byte_rate = sample_rate * block_align;
    let data_size = frame_count as u32 * block_align;

    let mut out = Vec::with_capacity(HEADER_LEN + data_size as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_size).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&(channel_count as u16).to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&(block_align as u16).to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_size.to_le_bytes());

    for frame in 0..frame_count {
        for channel in buffer.channels() {
            out.extend_from_slice(&quantize(channel[frame]).to_le_bytes());
        }
    }

    EncodedWav { data: out }
}

/// Clamp to [-1.0, 1.0] and scale onto the signed 16-bit grid.
///
/// The scale is the exact inverse of the decoder's /32768 normalization, so
/// every value on the quantization grid survives a round trip unchanged.
/// The output range stays asymmetric: full-scale negative reaches -32768
/// while full-scale positive saturates at 32767.
fn quantize(sample: f32) -> i16 {
    let scaled = (sample.clamp(-1.0, 1.0) * 32_768.0).round();
    if scaled >= 32_767.0 {
        32_767
    } else {
        scaled as i16
    }
}
