//! Tests for the espeak engine

#[cfg(test)]
mod tests {
    use crate::EspeakEngine;
    use voxstudio_tts::{SpeechSynthesizer, SynthesisOptions, TtsError, VoiceGender};

    fn args_for(options: &SynthesisOptions) -> Vec<String> {
        EspeakEngine::new().build_args("hello", options)
    }

    fn flag_value<'a>(args: &'a [String], flag: &str) -> &'a str {
        let pos = args.iter().position(|a| a == flag).unwrap();
        &args[pos + 1]
    }

    #[test]
    fn default_options_map_to_neutral_scales() {
        let args = args_for(&SynthesisOptions::default());
        assert_eq!(args[0], "--stdout");
        assert_eq!(flag_value(&args, "-s"), "175");
        assert_eq!(flag_value(&args, "-p"), "50");
        assert_eq!(flag_value(&args, "-a"), "160");
        assert_eq!(args.last().unwrap(), "hello");
    }

    #[test]
    fn pitch_multiplier_maps_onto_espeak_scale() {
        let options = SynthesisOptions {
            pitch: Some(0.8),
            ..Default::default()
        };
        assert_eq!(flag_value(&args_for(&options), "-p"), "40");

        let options = SynthesisOptions {
            pitch: Some(2.0),
            ..Default::default()
        };
        assert_eq!(flag_value(&args_for(&options), "-p"), "100");
    }

    #[test]
    fn rate_multiplier_clamps_to_espeak_bounds() {
        let options = SynthesisOptions {
            rate: Some(0.1),
            ..Default::default()
        };
        assert_eq!(flag_value(&args_for(&options), "-s"), "80");

        let options = SynthesisOptions {
            rate: Some(10.0),
            ..Default::default()
        };
        assert_eq!(flag_value(&args_for(&options), "-s"), "450");

        let options = SynthesisOptions {
            rate: Some(1.15),
            ..Default::default()
        };
        assert_eq!(flag_value(&args_for(&options), "-s"), "201");
    }

    #[test]
    fn requested_voice_overrides_default() {
        let engine = EspeakEngine::with_default_voice("en");
        let options = SynthesisOptions::with_voice("vi");
        let args = engine.build_args("xin chào", &options);
        assert_eq!(flag_value(&args, "-v"), "vi");
    }

    #[test]
    fn default_voice_applies_when_request_names_none() {
        let engine = EspeakEngine::with_default_voice("en-us");
        let args = engine.build_args("hello", &SynthesisOptions::default());
        assert_eq!(flag_value(&args, "-v"), "en-us");
    }

    #[test]
    fn voice_list_parsing_extracts_language_and_gender() {
        let listing = "\
Pty Language Age/Gender VoiceName          File          Other Languages
 5  en             M  en                   (en 2)
 5  en-us          M  english-us           (en-r 5)(en 3)
 5  vi             F  vietnam              vi
";
        let voices = EspeakEngine::parse_voice_list(listing);
        assert_eq!(voices.len(), 3);
        assert_eq!(voices[0].id, "en");
        assert_eq!(voices[0].gender, Some(VoiceGender::Male));
        assert_eq!(voices[2].language, "vi");
        assert_eq!(voices[2].gender, Some(VoiceGender::Female));
    }

    #[test]
    fn wav_stream_parsing_reads_format_from_header() {
        let mut stream = Vec::new();
        stream.extend_from_slice(b"RIFF");
        stream.extend_from_slice(&0xFFFF_FFFFu32.to_le_bytes()); // streamed placeholder
        stream.extend_from_slice(b"WAVE");
        stream.extend_from_slice(b"fmt ");
        stream.extend_from_slice(&16u32.to_le_bytes());
        stream.extend_from_slice(&1u16.to_le_bytes());
        stream.extend_from_slice(&1u16.to_le_bytes()); // mono
        stream.extend_from_slice(&22_050u32.to_le_bytes());
        stream.extend_from_slice(&(22_050u32 * 2).to_le_bytes());
        stream.extend_from_slice(&2u16.to_le_bytes());
        stream.extend_from_slice(&16u16.to_le_bytes());
        stream.extend_from_slice(b"data");
        stream.extend_from_slice(&0xFFFF_FFFFu32.to_le_bytes()); // streamed placeholder
        stream.extend_from_slice(&[0x01, 0x00, 0x02, 0x00]);

        let audio = crate::parse_wav_stream(&stream).unwrap();
        assert_eq!(audio.sample_rate, 22_050);
        assert_eq!(audio.channels, 1);
        assert_eq!(audio.pcm, vec![0x01, 0x00, 0x02, 0x00]);
    }

    #[test]
    fn wav_stream_parsing_rejects_non_wav_output() {
        assert!(matches!(
            crate::parse_wav_stream(b"espeak: error"),
            Err(TtsError::Engine { .. })
        ));
    }

    #[tokio::test]
    async fn empty_text_is_rejected_before_spawning() {
        let engine = EspeakEngine::new();
        let result = engine.synthesize("   \n ", &SynthesisOptions::default()).await;
        assert!(matches!(result, Err(TtsError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn availability_probe_does_not_panic() {
        // Passes whether or not espeak is installed in the test environment.
        let _ = EspeakEngine::new().is_available().await;
    }
}
