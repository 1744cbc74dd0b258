//! End-to-end pipeline tests: transport payload in, WAV bytes out.

use voxstudio_audio::{concatenate, decode_base64, decode_pcm, encode_wav, SampleBuffer};

/// Base64 for the 4 bytes [0x00, 0x00, 0xFF, 0x7F]: the int16 samples 0 and
/// 32767 as a provider would deliver them.
const PAYLOAD: &str = "AAD/fw==";

#[test]
fn provider_payload_survives_decode_and_reencode() {
    let bytes = decode_base64(PAYLOAD).unwrap();
    assert_eq!(bytes, vec![0x00, 0x00, 0xFF, 0x7F]);

    let buffer = decode_pcm(&bytes, 24_000, 1).unwrap();
    assert_eq!(buffer.frame_count(), 2);
    assert_eq!(buffer.channel(0)[0], 0.0);
    assert!((buffer.channel(0)[1] - 0.999_969_5).abs() < 1e-6);

    let wav = encode_wav(&buffer);
    let out = wav.as_bytes();
    assert_eq!(&out[44..46], &[0x00, 0x00]);
    assert_eq!(&out[46..48], &[0xFF, 0x7F]);
}

#[test]
fn multi_segment_synthesis_concatenates_before_encoding() {
    let seg_a = decode_pcm(&[0x01, 0x00, 0x02, 0x00], 24_000, 1).unwrap();
    let seg_b = decode_pcm(&[0x03, 0x00], 24_000, 1).unwrap();
    let joined = concatenate(&[seg_a, seg_b]).unwrap();

    let wav = encode_wav(&joined);
    assert_eq!(wav.len(), 44 + 6);
    let data = &wav.as_bytes()[44..];
    assert_eq!(data, &[0x01, 0x00, 0x02, 0x00, 0x03, 0x00]);
}

#[test]
fn encoder_output_is_readable_by_an_independent_wav_reader() {
    let buffer = SampleBuffer::from_channels(
        22_050,
        vec![
            vec![0.0, 0.25, -0.25, 1.0, -1.0],
            vec![0.5, -0.5, 0.125, -0.125, 0.0],
        ],
    )
    .unwrap();
    let wav = encode_wav(&buffer);

    let cursor = std::io::Cursor::new(wav.into_bytes());
    let mut reader = hound::WavReader::new(cursor).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 22_050);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);

    let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(samples.len(), 10);
    // First frame: L = 0.0 -> 0, R = 0.5 -> 16384.
    assert_eq!(samples[0], 0);
    assert_eq!(samples[1], 16_384);
    // Full-scale frame: L = 1.0 -> 32767, R = -0.125 -> -4096.
    assert_eq!(samples[6], 32_767);
    assert_eq!(samples[9], 0);
}

#[test]
fn silent_placeholder_encodes_to_a_valid_minimal_file() {
    let wav = encode_wav(&concatenate(&[]).unwrap());
    assert_eq!(wav.len(), 46);
    let cursor = std::io::Cursor::new(wav.into_bytes());
    let mut reader = hound::WavReader::new(cursor).unwrap();
    assert_eq!(reader.spec().sample_rate, 44_100);
    assert_eq!(reader.samples::<i16>().count(), 1);
}
