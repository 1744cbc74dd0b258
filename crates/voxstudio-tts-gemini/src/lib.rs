//! Gemini remote neural TTS adapter for VoxStudio
//!
//! Thin orchestration over the `generateContent` REST endpoint: build the
//! request, await the payload, hand the base64 audio back to the pipeline.
//! Retry policy and auth live here and nowhere else; the audio core never
//! retries, since its failures mean malformed data rather than transient
//! faults.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};
use voxstudio_audio::decode_base64;
use voxstudio_tts::{
    SpeechSynthesizer, SynthesisOptions, SynthesizedAudio, TtsError, TtsResult, VoiceGender,
    VoiceInfo,
};

pub mod protocol;

use protocol::{GenerateContentRequest, GenerateContentResponse};

/// Model used for speech generation.
pub const TTS_MODEL: &str = "gemini-2.5-flash-preview-tts";

/// The provider returns raw PCM in this fixed format; decode with exactly
/// these parameters.
pub const OUTPUT_SAMPLE_RATE: u32 = 24_000;
pub const OUTPUT_CHANNELS: u16 = 1;

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Keeps the model reading the text in its own language instead of
/// interpreting it as an instruction.
const READING_PROMPT: &str = "Read this text clearly and naturally in its intended language:";

const INITIAL_RETRY_DELAY: Duration = Duration::from_secs(1);
const RETRY_MULTIPLIER: u32 = 2;

/// Prebuilt voices the provider offers for speech generation.
pub fn prebuilt_voices() -> Vec<VoiceInfo> {
    [
        ("Kore", "Kore (Deep, Neutral)"),
        ("Puck", "Puck (Cheerful, High-pitch)"),
        ("Charon", "Charon (Steady, Mature)"),
        ("Fenrir", "Fenrir (Strong, Direct)"),
        ("Zephyr", "Zephyr (Warm, Helpful)"),
    ]
    .into_iter()
    .map(|(id, label)| VoiceInfo {
        id: id.to_string(),
        name: label.to_string(),
        language: "multi".to_string(),
        gender: Some(VoiceGender::Neutral),
    })
    .collect()
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
    pub default_voice: String,
    /// Bound on a single request; expiry surfaces as a network error.
    pub timeout: Duration,
    /// Attempts beyond the first on retryable (429/5xx) responses.
    pub max_retries: u32,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: TTS_MODEL.to_string(),
            default_voice: "Kore".to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
        }
    }

    /// Read the API key from `GEMINI_API_KEY`, falling back to `API_KEY`.
    pub fn from_env() -> TtsResult<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .map_err(|_| {
                TtsError::EngineNotAvailable(
                    "no API key in GEMINI_API_KEY or API_KEY".to_string(),
                )
            })?;
        Ok(Self::new(api_key))
    }
}

pub struct GeminiEngine {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiEngine {
    pub fn new(config: GeminiConfig) -> TtsResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TtsError::Network(e.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn from_env() -> TtsResult<Self> {
        Self::new(GeminiConfig::from_env()?)
    }

    fn request_url(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.config.endpoint, self.config.model
        )
    }

    /// Fetch the base64 audio payload for one text segment.
    ///
    /// Retries 429 and 5xx responses with exponential backoff up to the
    /// configured attempt budget; everything else fails immediately.
    pub async fn fetch_speech(&self, text: &str, voice_id: &str) -> TtsResult<String> {
        let prompt = format!("{READING_PROMPT} {text}");
        let request = GenerateContentRequest::speech(prompt, voice_id.to_string());

        let mut delay = INITIAL_RETRY_DELAY;
        let mut attempt = 0;
        loop {
            match self.send_once(&request).await {
                Ok(payload) => return Ok(payload),
                Err(RequestFailure::Retryable(status)) if attempt < self.config.max_retries => {
                    attempt += 1;
                    warn!(
                        status,
                        attempt, "provider returned a transient error, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    delay *= RETRY_MULTIPLIER;
                }
                Err(RequestFailure::Retryable(status)) => {
                    return Err(TtsError::Provider(format!(
                        "provider kept failing with status {status} after {attempt} retries"
                    )));
                }
                Err(RequestFailure::Fatal(err)) => return Err(err),
            }
        }
    }

    async fn send_once(&self, request: &GenerateContentRequest) -> Result<String, RequestFailure> {
        let response = self
            .http
            .post(self.request_url())
            .header("x-goog-api-key", &self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| RequestFailure::Fatal(map_transport_error(e)))?;

        let status = response.status();
        if is_retryable(status.as_u16()) {
            return Err(RequestFailure::Retryable(status.as_u16()));
        }
        if !status.is_success() {
            return Err(RequestFailure::Fatal(TtsError::Provider(format!(
                "provider returned status {status}"
            ))));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| RequestFailure::Fatal(map_transport_error(e)))?;

        body.audio_payload().ok_or_else(|| {
            RequestFailure::Fatal(TtsError::Provider("no audio data".to_string()))
        })
    }
}

enum RequestFailure {
    /// Worth another attempt after a backoff
    Retryable(u16),
    Fatal(TtsError),
}

/// 429 and server-side failures may be transient; nothing else is.
fn is_retryable(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}

fn map_transport_error(err: reqwest::Error) -> TtsError {
    if err.is_timeout() {
        TtsError::Network(format!("request timed out: {err}"))
    } else if err.is_decode() {
        TtsError::Provider(format!("unreadable provider response: {err}"))
    } else {
        TtsError::Network(err.to_string())
    }
}

#[async_trait]
impl SpeechSynthesizer for GeminiEngine {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn is_available(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    async fn list_voices(&self) -> TtsResult<Vec<VoiceInfo>> {
        Ok(prebuilt_voices())
    }

    async fn synthesize(
        &self,
        text: &str,
        options: &SynthesisOptions,
    ) -> TtsResult<SynthesizedAudio> {
        if text.trim().is_empty() {
            return Err(TtsError::InvalidInput("empty text input".to_string()));
        }

        let voice = options
            .voice
            .as_deref()
            .unwrap_or(&self.config.default_voice);

        let payload = self.fetch_speech(text, voice).await?;
        let pcm = decode_base64(&payload)?;
        debug!(
            bytes = pcm.len(),
            voice, "decoded provider audio payload"
        );

        Ok(SynthesizedAudio {
            pcm,
            sample_rate: OUTPUT_SAMPLE_RATE,
            channels: OUTPUT_CHANNELS,
        })
    }
}
