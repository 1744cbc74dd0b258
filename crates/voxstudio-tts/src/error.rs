//! Error types for TTS functionality

use thiserror::Error;
use voxstudio_audio::AudioError;

/// TTS error types
#[derive(Error, Debug)]
pub enum TtsError {
    /// Engine is not available or not installed
    #[error("TTS engine not available: {0}")]
    EngineNotAvailable(String),

    /// Voice not found or not supported
    #[error("voice not found: {0}")]
    VoiceNotFound(String),

    /// Invalid text input
    #[error("invalid text input: {0}")]
    InvalidInput(String),

    /// Remote provider returned no usable payload
    #[error("provider error: {0}")]
    Provider(String),

    /// Transport or timeout failure reaching the provider
    #[error("network error: {0}")]
    Network(String),

    /// Engine-specific failure
    #[error("engine error ({engine}): {message}")]
    Engine { engine: String, message: String },

    /// Payload decoding or buffer stitching failed
    #[error("audio pipeline error: {0}")]
    Audio(#[from] AudioError),

    /// IO error (process spawning, file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for TTS operations
pub type TtsResult<T> = Result<T, TtsError>;

impl TtsError {
    /// Adapter failures (network/provider) are collapsed to one generic
    /// user-facing message; deterministic pipeline errors keep their
    /// specific message.
    pub fn is_adapter_failure(&self) -> bool {
        matches!(self, TtsError::Provider(_) | TtsError::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_failures_are_classified() {
        assert!(TtsError::Provider("no audio data".into()).is_adapter_failure());
        assert!(TtsError::Network("timeout".into()).is_adapter_failure());
        assert!(!TtsError::InvalidInput("empty".into()).is_adapter_failure());
        assert!(!TtsError::Audio(AudioError::PartialSample(5)).is_adapter_failure());
    }
}
