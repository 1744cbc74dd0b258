//! eSpeak local engine implementation for VoxStudio
//!
//! The on-device counterpart to the remote neural provider: synthesis runs
//! through an `espeak` (or `espeak-ng`) subprocess with no network involved.
//! Pitch and rate multipliers are passed through from the studio and mapped
//! onto espeak's own scales only at the argument boundary.

use async_trait::async_trait;
use regex::Regex;
use tokio::process::Command;
use tracing::{debug, error};
use voxstudio_tts::{
    SpeechSynthesizer, SynthesisOptions, SynthesizedAudio, TtsError, TtsResult, VoiceGender,
    VoiceInfo,
};

mod tests;

/// Default speaking rate in words per minute at a rate multiplier of 1.0.
const BASE_WORDS_PER_MINUTE: f32 = 175.0;

pub struct EspeakEngine {
    default_voice: Option<String>,
}

impl Default for EspeakEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl EspeakEngine {
    pub fn new() -> Self {
        Self {
            default_voice: None,
        }
    }

    pub fn with_default_voice(voice: impl Into<String>) -> Self {
        Self {
            default_voice: Some(voice.into()),
        }
    }

    /// Get the espeak command name (espeak or espeak-ng)
    async fn espeak_command() -> Option<&'static str> {
        for cmd in ["espeak", "espeak-ng"] {
            if Command::new(cmd).arg("--version").output().await.is_ok() {
                return Some(cmd);
            }
        }
        None
    }

    /// Parse espeak voice list output
    fn parse_voice_list(output: &str) -> Vec<VoiceInfo> {
        let mut voices = Vec::new();

        // espeak voice list format: Pty Language Age/Gender VoiceName File Other
        // Example: 5  en             M  en                 (en 2)
        let voice_regex = Regex::new(r"^\s*(\d+)\s+([\w-]+)\s+([MF\+]?)\s+([\w\-_]+)\s+").unwrap();

        for line in output.lines().skip(1) {
            if let Some(captures) = voice_regex.captures(line) {
                let language = captures.get(2).map_or("unknown", |m| m.as_str()).to_string();
                let gender_char = captures.get(3).map_or("", |m| m.as_str());
                let voice_id = captures.get(4).map_or("unknown", |m| m.as_str()).to_string();

                let gender = match gender_char {
                    "M" => Some(VoiceGender::Male),
                    "F" => Some(VoiceGender::Female),
                    _ => Some(VoiceGender::Unknown),
                };

                voices.push(VoiceInfo {
                    id: voice_id.clone(),
                    name: format!("{} ({})", language, voice_id),
                    language,
                    gender,
                });
            }
        }

        voices
    }

    /// Build espeak command arguments from the studio's pass-through options
    fn build_args(&self, text: &str, options: &SynthesisOptions) -> Vec<String> {
        let mut args = vec!["--stdout".to_string()];

        let voice = options.voice.as_ref().or(self.default_voice.as_ref());
        if let Some(voice_id) = voice {
            args.push("-v".to_string());
            args.push(voice_id.clone());
        }

        // Rate multiplier -> words per minute, clamped to espeak's 80-450.
        let rate = options.rate.unwrap_or(1.0);
        let wpm = (BASE_WORDS_PER_MINUTE * rate).round().clamp(80.0, 450.0) as u32;
        args.push("-s".to_string());
        args.push(wpm.to_string());

        // Pitch multiplier -> espeak's 0-100 scale where 50 is normal.
        let pitch = options.pitch.unwrap_or(1.0);
        let pitch_value = ((pitch * 50.0).round() as i64).clamp(0, 100);
        args.push("-p".to_string());
        args.push(pitch_value.to_string());

        // Volume -> espeak's 0-200 amplitude scale.
        let volume = options.volume.unwrap_or(0.8);
        let volume_value = ((volume * 200.0).round() as i64).clamp(0, 200);
        args.push("-a".to_string());
        args.push(volume_value.to_string());

        args.push(text.to_string());

        args
    }
}

/// Pull the raw PCM and its declared format out of espeak's WAV stdout.
///
/// espeak streams its output, so the RIFF and data chunk lengths in the
/// header are placeholders; strict WAV readers reject them. The format
/// fields live at fixed offsets in the canonical 44-byte header, and
/// everything after the data tag is sample data.
fn parse_wav_stream(bytes: &[u8]) -> TtsResult<SynthesizedAudio> {
    let engine_err = |message: &str| TtsError::Engine {
        engine: "espeak".to_string(),
        message: message.to_string(),
    };

    if bytes.len() < 44 || &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
        return Err(engine_err("stdout did not contain a WAV stream"));
    }
    let channels = u16::from_le_bytes([bytes[22], bytes[23]]);
    let sample_rate = u32::from_le_bytes([bytes[24], bytes[25], bytes[26], bytes[27]]);
    let bits = u16::from_le_bytes([bytes[34], bytes[35]]);
    if bits != 16 || channels == 0 || sample_rate == 0 {
        return Err(engine_err("unexpected WAV stream format"));
    }
    if &bytes[36..40] != b"data" {
        return Err(engine_err("WAV stream missing data chunk"));
    }

    let mut pcm = bytes[44..].to_vec();
    // A streamed write can end mid-sample; drop the dangling byte rather
    // than failing the whole synthesis.
    if pcm.len() % 2 != 0 {
        pcm.pop();
    }

    Ok(SynthesizedAudio {
        pcm,
        sample_rate,
        channels,
    })
}

#[async_trait]
impl SpeechSynthesizer for EspeakEngine {
    fn name(&self) -> &str {
        "eSpeak"
    }

    async fn is_available(&self) -> bool {
        Self::espeak_command().await.is_some()
    }

    async fn list_voices(&self) -> TtsResult<Vec<VoiceInfo>> {
        let cmd = Self::espeak_command()
            .await
            .ok_or_else(|| TtsError::EngineNotAvailable("espeak not found".to_string()))?;

        let output = Command::new(cmd).arg("--voices").output().await?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let voices = Self::parse_voice_list(&stdout);
        debug!("Loaded {} espeak voices", voices.len());
        Ok(voices)
    }

    async fn synthesize(
        &self,
        text: &str,
        options: &SynthesisOptions,
    ) -> TtsResult<SynthesizedAudio> {
        if text.trim().is_empty() {
            return Err(TtsError::InvalidInput("empty text input".to_string()));
        }

        let cmd = Self::espeak_command().await.ok_or_else(|| {
            TtsError::EngineNotAvailable(
                "espeak not found; install espeak or espeak-ng".to_string(),
            )
        })?;

        let args = self.build_args(text, options);
        debug!("Running espeak synthesis: {} {:?}", cmd, args);

        let output = Command::new(cmd).args(&args).output().await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("espeak synthesis failed: {}", stderr);
            return Err(TtsError::Engine {
                engine: "espeak".to_string(),
                message: stderr.trim().to_string(),
            });
        }

        if output.stdout.is_empty() {
            return Err(TtsError::Engine {
                engine: "espeak".to_string(),
                message: "no audio data generated".to_string(),
            });
        }

        parse_wav_stream(&output.stdout)
    }
}
