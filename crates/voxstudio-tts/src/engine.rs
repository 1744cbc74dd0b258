//! Synthesizer abstraction shared by the local and remote engines

use async_trait::async_trait;

use crate::error::TtsResult;
use crate::types::{SynthesisOptions, VoiceInfo};
use voxstudio_audio::{decode_pcm, SampleBuffer};

/// Raw audio produced by a synthesizer, in the provider-declared format.
///
/// Engines always deliver interleaved signed 16-bit little-endian PCM; the
/// rate and channel count are fixed by the engine (24 kHz mono for the
/// remote neural provider, whatever the local engine reports for itself).
#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    /// Interleaved signed 16-bit LE PCM
    pub pcm: Vec<u8>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl SynthesizedAudio {
    /// Decode into a normalized sample buffer using the engine-declared
    /// format parameters.
    pub fn into_sample_buffer(self) -> TtsResult<SampleBuffer> {
        Ok(decode_pcm(&self.pcm, self.sample_rate, self.channels)?)
    }

    pub fn duration_ms(&self) -> u64 {
        let frames = self.pcm.len() as u64 / (2 * self.channels as u64);
        frames * 1000 / self.sample_rate as u64
    }
}

/// Core synthesis interface
///
/// Implementations provide specific engines (espeak subprocess, remote
/// neural provider). Synthesis is one shot per call: text in, one audio
/// payload out. Engines hold no per-request mutable state, so a single
/// instance can serve the whole studio behind an `Arc`.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Engine name/identifier
    fn name(&self) -> &str;

    /// Check if the engine can synthesize on this system
    async fn is_available(&self) -> bool;

    /// Voices this engine offers
    async fn list_voices(&self) -> TtsResult<Vec<VoiceInfo>>;

    /// Synthesize one text segment to audio
    async fn synthesize(&self, text: &str, options: &SynthesisOptions)
        -> TtsResult<SynthesizedAudio>;
}
