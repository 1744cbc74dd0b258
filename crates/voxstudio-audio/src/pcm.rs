//! Raw PCM payload decoding

use tracing::debug;

use crate::buffer::SampleBuffer;
use crate::error::AudioError;

/// Decode interleaved signed 16-bit little-endian PCM into a sample buffer.
///
/// `frame_count` is the number of complete frames in the payload; a trailing
/// partial frame (fewer than `channel_count` samples) is silently dropped.
/// An odd byte count is malformed input and fails, since it cannot even form
/// a whole 16-bit sample.
///
/// Normalization divides by 32768, so -32768 maps to exactly -1.0 and no
/// positive sample reaches +1.0. The WAV encoder applies the matching
/// asymmetric scale on the way back out.
pub fn decode_pcm(
    bytes: &[u8],
    sample_rate: u32,
    channel_count: u16,
) -> Result<SampleBuffer, AudioError> {
    if channel_count == 0 {
        return Err(AudioError::NoChannels);
    }
    if bytes.len() % 2 != 0 {
        return Err(AudioError::PartialSample(bytes.len()));
    }

    let channels = channel_count as usize;
    let total_samples = bytes.len() / 2;
    let frame_count = total_samples / channels;

    let leftover = total_samples % channels;
    if leftover != 0 {
        debug!(
            leftover,
            channels, "dropping trailing partial frame from PCM payload"
        );
    }

    let mut data: Vec<Vec<f32>> = (0..channels)
        .map(|_| Vec::with_capacity(frame_count))
        .collect();
    for (i, sample_bytes) in bytes
        .chunks_exact(2)
        .take(frame_count * channels)
        .enumerate()
    {
        let sample = i16::from_le_bytes([sample_bytes[0], sample_bytes[1]]);
        data[i % channels].push(sample as f32 / 32_768.0);
    }

    SampleBuffer::from_channels(sample_rate, data)
}
