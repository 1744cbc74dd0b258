//! Studio flow through the public API: text in, WAV file out.

use std::sync::Arc;

use async_trait::async_trait;
use voxstudio_app::{split_segments, StudioController, SynthesisPipeline};
use voxstudio_foundation::StudioConfig;
use voxstudio_tts::{
    SpeechSynthesizer, SynthesisOptions, SynthesizedAudio, TtsResult, VoiceInfo,
};

/// Deterministic engine: each segment synthesizes to the three samples
/// [1, 2, 3] at the remote provider's fixed 24 kHz mono format.
struct ScriptedEngine;

#[async_trait]
impl SpeechSynthesizer for ScriptedEngine {
    fn name(&self) -> &str {
        "scripted"
    }
    async fn is_available(&self) -> bool {
        true
    }
    async fn list_voices(&self) -> TtsResult<Vec<VoiceInfo>> {
        Ok(vec![])
    }
    async fn synthesize(
        &self,
        _text: &str,
        _options: &SynthesisOptions,
    ) -> TtsResult<SynthesizedAudio> {
        Ok(SynthesizedAudio {
            pcm: vec![0x01, 0x00, 0x02, 0x00, 0x03, 0x00],
            sample_rate: 24_000,
            channels: 1,
        })
    }
}

#[tokio::test]
async fn dialogue_text_exports_one_continuous_wav() {
    let dir = tempfile::tempdir().unwrap();
    let config = StudioConfig {
        export_dir: dir.path().to_string_lossy().into_owned(),
        export_prefix: "session".to_string(),
        ..Default::default()
    };
    let controller = StudioController::new(Arc::new(ScriptedEngine), &config);

    let text = "A: Good morning. How are you today?\nB: I'm doing well, thanks. How about you?";
    assert_eq!(split_segments(text).len(), 2);

    let path = controller
        .export(text, &SynthesisOptions::default())
        .await
        .unwrap()
        .expect("nothing raced this request");

    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("session-") && name.ends_with(".wav"));

    // Two segments of three frames each, stitched in submission order.
    let mut reader = hound::WavReader::open(&path).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.sample_rate, 24_000);
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.bits_per_sample, 16);
    let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(samples, vec![1, 2, 3, 1, 2, 3]);
}

#[tokio::test]
async fn render_feeds_the_pipeline_without_touching_disk() {
    let pipeline = SynthesisPipeline::new(Arc::new(ScriptedEngine));
    let buffer = pipeline
        .synthesize_text("one\ntwo\nthree", &SynthesisOptions::default())
        .await
        .unwrap();
    assert_eq!(buffer.frame_count(), 9);
    assert_eq!(buffer.channel_count(), 1);
    assert_eq!(buffer.sample_rate(), 24_000);
}
