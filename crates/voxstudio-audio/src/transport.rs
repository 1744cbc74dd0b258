//! Transport payload decoding
//!
//! Remote providers deliver audio as base64 text inside a JSON response;
//! this is the first hop from transport encoding to raw PCM bytes.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::AudioError;

/// Decode a standard (non-URL-safe) base64 string into raw bytes.
///
/// Characters outside the base64 alphabet or malformed padding fail with a
/// decode error; no canonicalization is attempted.
pub fn decode_base64(input: &str) -> Result<Vec<u8>, AudioError> {
    Ok(STANDARD.decode(input)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_standard_alphabet() {
        assert_eq!(decode_base64("AAD/fw==").unwrap(), vec![0x00, 0x00, 0xFF, 0x7F]);
    }

    #[test]
    fn rejects_characters_outside_alphabet() {
        assert!(matches!(
            decode_base64("not base64!"),
            Err(AudioError::Base64(_))
        ));
    }

    #[test]
    fn rejects_malformed_padding() {
        assert!(matches!(decode_base64("AAD="), Err(AudioError::Base64(_))));
    }

    #[test]
    fn empty_input_yields_empty_bytes() {
        assert!(decode_base64("").unwrap().is_empty());
    }
}
