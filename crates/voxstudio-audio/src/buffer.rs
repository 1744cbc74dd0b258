//! Normalized multi-channel sample buffers

use crate::error::AudioError;

/// Sample rate used for the silent placeholder buffer when no real rate is
/// known (empty concatenation input).
pub const FALLBACK_SAMPLE_RATE: u32 = 44_100;

/// An immutable multi-channel audio buffer.
///
/// Samples are f32 normalized to [-1.0, 1.0], stored per channel. Every
/// channel holds exactly `frame_count()` samples; this is validated at
/// construction and can never be violated afterwards because the type
/// exposes no mutating methods.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    sample_rate: u32,
    channels: Vec<Vec<f32>>,
}

impl SampleBuffer {
    /// Build a buffer from per-channel sample data.
    ///
    /// Fails if no channels are given or if the channels disagree on length.
    pub fn from_channels(sample_rate: u32, channels: Vec<Vec<f32>>) -> Result<Self, AudioError> {
        let first_len = channels.first().ok_or(AudioError::NoChannels)?.len();
        for (idx, channel) in channels.iter().enumerate().skip(1) {
            if channel.len() != first_len {
                return Err(AudioError::RaggedChannels {
                    channel: idx,
                    expected: first_len,
                    actual: channel.len(),
                });
            }
        }
        Ok(Self {
            sample_rate,
            channels,
        })
    }

    /// The 1-channel, 1-frame silent placeholder handed to downstream code
    /// when there is nothing to play or encode.
    pub fn silent() -> Self {
        Self {
            sample_rate: FALLBACK_SAMPLE_RATE,
            channels: vec![vec![0.0]],
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> u16 {
        self.channels.len() as u16
    }

    /// One frame = one sample per channel.
    pub fn frame_count(&self) -> usize {
        self.channels[0].len()
    }

    /// Samples for one channel. Panics if the index is out of range.
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    pub fn duration_ms(&self) -> u64 {
        (self.frame_count() as u64 * 1000) / self.sample_rate as u64
    }
}
