//! Stitching segment buffers into one recording

use crate::buffer::SampleBuffer;
use crate::error::AudioError;

/// Join an ordered sequence of buffers into one contiguous buffer.
///
/// Empty input returns the silent placeholder so downstream playback and
/// encoding always receive a valid buffer; a single buffer is returned
/// unchanged. All buffers must share the first buffer's channel count and
/// sample rate; no resampling or channel mapping happens here, a mismatch
/// fails instead.
///
/// Output frames are laid out back to back in input order with no
/// crossfading or silence padding between segments.
pub fn concatenate(buffers: &[SampleBuffer]) -> Result<SampleBuffer, AudioError> {
    let (first, rest) = match buffers {
        [] => return Ok(SampleBuffer::silent()),
        [single] => return Ok(single.clone()),
        [first, rest @ ..] => (first, rest),
    };

    for buffer in rest {
        if buffer.channel_count() != first.channel_count() {
            return Err(AudioError::ChannelMismatch {
                expected: first.channel_count(),
                actual: buffer.channel_count(),
            });
        }
        if buffer.sample_rate() != first.sample_rate() {
            return Err(AudioError::RateMismatch {
                expected: first.sample_rate(),
                actual: buffer.sample_rate(),
            });
        }
    }

    let total_frames: usize = buffers.iter().map(SampleBuffer::frame_count).sum();
    let mut channels: Vec<Vec<f32>> = (0..first.channel_count() as usize)
        .map(|_| Vec::with_capacity(total_frames))
        .collect();
    for buffer in buffers {
        for (index, out) in channels.iter_mut().enumerate() {
            out.extend_from_slice(buffer.channel(index));
        }
    }

    SampleBuffer::from_channels(first.sample_rate(), channels)
}
