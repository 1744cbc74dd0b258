use thiserror::Error;

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("malformed base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("PCM payload length {0} is not a whole number of 16-bit samples")]
    PartialSample(usize),

    #[error("channel count must be at least 1")]
    NoChannels,

    #[error("channel {channel} holds {actual} frames, expected {expected}")]
    RaggedChannels {
        channel: usize,
        expected: usize,
        actual: usize,
    },

    #[error("channel count mismatch: expected {expected}, got {actual}")]
    ChannelMismatch { expected: u16, actual: u16 },

    #[error("sample rate mismatch: expected {expected} Hz, got {actual} Hz")]
    RateMismatch { expected: u32, actual: u32 },
}

impl AudioError {
    /// True for malformed-input decode failures, as opposed to buffers that
    /// disagree with each other on format.
    pub fn is_decode_error(&self) -> bool {
        matches!(self, AudioError::Base64(_) | AudioError::PartialSample(_))
    }

    pub fn is_format_mismatch(&self) -> bool {
        matches!(
            self,
            AudioError::ChannelMismatch { .. } | AudioError::RateMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_and_mismatch_classes_are_disjoint() {
        let decode = AudioError::PartialSample(5);
        assert!(decode.is_decode_error());
        assert!(!decode.is_format_mismatch());

        let mismatch = AudioError::RateMismatch {
            expected: 24_000,
            actual: 22_050,
        };
        assert!(mismatch.is_format_mismatch());
        assert!(!mismatch.is_decode_error());
    }
}
