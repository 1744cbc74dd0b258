//! Quantization round-trip properties

use proptest::prelude::*;
use voxstudio_audio::{decode_pcm, encode_wav, SampleBuffer};

fn reencode(samples: Vec<f32>, sample_rate: u32) -> Vec<f32> {
    let buffer = SampleBuffer::from_channels(sample_rate, vec![samples]).unwrap();
    let wav = encode_wav(&buffer);
    decode_pcm(&wav.as_bytes()[44..], sample_rate, 1)
        .unwrap()
        .channel(0)
        .to_vec()
}

proptest! {
    /// Values already on the 16-bit quantization grid survive an
    /// encode/decode cycle exactly.
    #[test]
    fn grid_values_are_lossless(ints in prop::collection::vec(-32768i32..=32767, 1..256)) {
        let samples: Vec<f32> = ints.iter().map(|&s| s as f32 / 32_768.0).collect();
        let decoded = reencode(samples.clone(), 24_000);
        prop_assert_eq!(decoded, samples);
    }

    /// Arbitrary in-range floats round-trip within one quantization step.
    #[test]
    fn floats_round_trip_within_one_step(samples in prop::collection::vec(-1.0f32..=1.0, 1..256)) {
        let decoded = reencode(samples.clone(), 24_000);
        for (orig, back) in samples.iter().zip(&decoded) {
            prop_assert!((orig - back).abs() <= 1.0 / 32_768.0,
                "{} -> {} drifted more than one step", orig, back);
        }
    }

    /// Out-of-range samples behave exactly like their clamped counterparts.
    #[test]
    fn out_of_range_matches_clamped(sample in -8.0f32..=8.0) {
        let wild = reencode(vec![sample], 24_000);
        let tame = reencode(vec![sample.clamp(-1.0, 1.0)], 24_000);
        prop_assert_eq!(wild, tame);
    }
}
