//! Synthesis pipeline: text in, one sample buffer out

use std::sync::Arc;

use tracing::debug;
use voxstudio_audio::{concatenate, SampleBuffer};
use voxstudio_tts::{
    resolve_voice, variant_by_id, SpeechSynthesizer, SynthesisOptions, TtsError, TtsResult,
};

use crate::segment::split_segments;

/// Build synthesis options for a named voice variant on a local engine.
///
/// Resolves the variant against the voices the engine actually offers: a
/// native gender match keeps the engine voice's own pitch, anything else
/// falls back to the variant's pitch/rate shift on the first voice.
pub async fn variant_options(
    engine: &dyn SpeechSynthesizer,
    variant_id: &str,
) -> TtsResult<SynthesisOptions> {
    let variant =
        variant_by_id(variant_id).ok_or_else(|| TtsError::VoiceNotFound(variant_id.to_string()))?;
    let voices = engine.list_voices().await?;
    let selection = resolve_voice(variant, &voices);
    Ok(SynthesisOptions {
        voice: selection.voice.map(|v| v.id.clone()),
        pitch: Some(selection.pitch),
        rate: Some(selection.rate),
        volume: None,
    })
}

/// Drives one engine across the segments of a text submission and stitches
/// the per-segment buffers into a single recording.
pub struct SynthesisPipeline {
    engine: Arc<dyn SpeechSynthesizer>,
}

impl SynthesisPipeline {
    pub fn new(engine: Arc<dyn SpeechSynthesizer>) -> Self {
        Self { engine }
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    /// Synthesize a full text submission into one continuous buffer.
    ///
    /// Segments are synthesized sequentially in order; a failure in any
    /// segment aborts the whole request. Text with no speakable segment
    /// fails before any engine call.
    pub async fn synthesize_text(
        &self,
        text: &str,
        options: &SynthesisOptions,
    ) -> TtsResult<SampleBuffer> {
        let segments = split_segments(text);
        if segments.is_empty() {
            return Err(TtsError::InvalidInput("no speakable text".to_string()));
        }

        let mut buffers = Vec::with_capacity(segments.len());
        for (index, segment) in segments.iter().enumerate() {
            let audio = self.engine.synthesize(segment, options).await?;
            debug!(
                segment = index,
                ms = audio.duration_ms(),
                "synthesized segment"
            );
            buffers.push(audio.into_sample_buffer()?);
        }

        Ok(concatenate(&buffers)?)
    }
}
