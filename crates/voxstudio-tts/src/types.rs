//! Core types for text-to-speech functionality

use serde::{Deserialize, Serialize};

/// Pitch multiplier bounds conventionally accepted by speech engines
/// (1.0 is normal). Passed through to engines, not validated here.
pub const PITCH_RANGE: (f32, f32) = (0.5, 2.0);

/// Speaking-rate multiplier bounds conventionally accepted by speech
/// engines (1.0 is normal). Passed through to engines, not validated here.
pub const RATE_RANGE: (f32, f32) = (0.1, 10.0);

/// Voice information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceInfo {
    /// Unique voice identifier (provider-defined string)
    pub id: String,
    /// Human-readable voice name
    pub name: String,
    /// Language code (e.g., "en-US", "vi-VN")
    pub language: String,
    /// Gender (if the engine reports one)
    pub gender: Option<VoiceGender>,
}

/// Voice gender categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoiceGender {
    Male,
    Female,
    Neutral,
    Unknown,
}

/// Options for individual synthesis requests
#[derive(Debug, Clone)]
pub struct SynthesisOptions {
    /// Voice to use for this synthesis
    pub voice: Option<String>,
    /// Pitch multiplier, see [`PITCH_RANGE`]
    pub pitch: Option<f32>,
    /// Speaking-rate multiplier, see [`RATE_RANGE`]
    pub rate: Option<f32>,
    /// Volume (0.0-1.0)
    pub volume: Option<f32>,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            voice: None,
            pitch: None,
            rate: None,
            volume: None,
        }
    }
}

impl SynthesisOptions {
    pub fn with_voice(voice: impl Into<String>) -> Self {
        Self {
            voice: Some(voice.into()),
            ..Default::default()
        }
    }
}
