//! Text-to-speech abstraction layer for VoxStudio
//!
//! This crate provides the foundational types and traits for speech
//! synthesis: the synthesizer trait implemented by the local and remote
//! engines, voice metadata, per-request options, and the error taxonomy
//! shared across the synthesis side of the studio.

use std::sync::atomic::{AtomicU64, Ordering};

pub mod engine;
pub mod error;
pub mod types;
pub mod variants;

pub use engine::{SpeechSynthesizer, SynthesizedAudio};
pub use error::{TtsError, TtsResult};
pub use types::{SynthesisOptions, VoiceGender, VoiceInfo, PITCH_RANGE, RATE_RANGE};
pub use variants::{resolve_voice, variant_by_id, VariantSelection, VoiceVariant, VOICE_VARIANTS};

/// Generates unique synthesis request IDs
static SYNTHESIS_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Generate a unique synthesis request ID
pub fn next_synthesis_id() -> u64 {
    SYNTHESIS_ID_COUNTER.fetch_add(1, Ordering::SeqCst)
}
