//! Studio controller
//!
//! Owns the synthesis lifecycle for one studio session: at most one active
//! synthesis at a time, with a newer request superseding an in-flight one
//! by generation counter. The stale result is discarded, never awaited
//! against. Playback is an exclusive resource: starting a new session
//! replaces and stops the previous one.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, error};
use voxstudio_audio::SampleBuffer;
use voxstudio_foundation::{AppError, StateManager, StudioConfig, StudioState};
use voxstudio_tts::{next_synthesis_id, SpeechSynthesizer, SynthesisOptions, TtsError};

use crate::export::WavExporter;
use crate::pipeline::SynthesisPipeline;
use crate::playback::{PlaybackError, PlaybackSession};

#[derive(Error, Debug)]
pub enum StudioError {
    /// Network and provider failures surface as this one generic message;
    /// the specific kind is logged, never shown.
    #[error("synthesis failed")]
    SynthesisFailed,

    /// Deterministic pipeline failures (malformed input, decode errors)
    /// keep their specific message.
    #[error(transparent)]
    Tts(TtsError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),

    #[error(transparent)]
    State(#[from] AppError),

    #[error("export failed: {0}")]
    Export(#[from] std::io::Error),
}

#[derive(Debug, PartialEq, Eq)]
pub enum SpeakOutcome {
    /// Playback started for this request
    Started { request_id: u64 },
    /// A newer request won the race; this result was discarded
    Superseded,
}

pub struct StudioController {
    pipeline: SynthesisPipeline,
    state: StateManager,
    playback: Mutex<Option<PlaybackSession>>,
    active_request: AtomicU64,
    exporter: WavExporter,
}

impl StudioController {
    pub fn new(engine: Arc<dyn SpeechSynthesizer>, config: &StudioConfig) -> Self {
        Self {
            pipeline: SynthesisPipeline::new(engine),
            state: StateManager::new(),
            playback: Mutex::new(None),
            active_request: AtomicU64::new(0),
            exporter: WavExporter::from_config(config),
        }
    }

    /// Controller backed by the local espeak engine.
    #[cfg(feature = "espeak")]
    pub fn with_local_engine(config: &StudioConfig) -> Self {
        let mut engine = voxstudio_tts_espeak::EspeakEngine::new();
        if let Some(voice) = &config.default_local_voice {
            engine = voxstudio_tts_espeak::EspeakEngine::with_default_voice(voice);
        }
        Self::new(Arc::new(engine), config)
    }

    /// Controller backed by the remote neural engine, keyed from the
    /// environment.
    pub fn with_remote_engine(config: &StudioConfig) -> Result<Self, StudioError> {
        let mut gemini_config = voxstudio_tts_gemini::GeminiConfig::from_env()
            .map_err(StudioError::Tts)?;
        gemini_config.default_voice = config.default_remote_voice.clone();
        gemini_config.timeout = std::time::Duration::from_secs(config.request_timeout_secs);
        gemini_config.max_retries = config.max_retries;
        let engine =
            voxstudio_tts_gemini::GeminiEngine::new(gemini_config).map_err(StudioError::Tts)?;
        Ok(Self::new(Arc::new(engine), config))
    }

    pub fn state(&self) -> StudioState {
        self.state.current()
    }

    pub fn is_speaking(&self) -> bool {
        self.state.current() == StudioState::Speaking
    }

    /// Synthesize a text submission into a buffer without playing it.
    ///
    /// Returns `None` when a newer request superseded this one while it was
    /// awaiting the engine; the stale result (or stale failure) is discarded
    /// rather than surfaced.
    pub async fn render(
        &self,
        text: &str,
        options: &SynthesisOptions,
    ) -> Result<Option<SampleBuffer>, StudioError> {
        Ok(self
            .render_request(text, options)
            .await?
            .map(|(_, buffer)| buffer))
    }

    async fn render_request(
        &self,
        text: &str,
        options: &SynthesisOptions,
    ) -> Result<Option<(u64, SampleBuffer)>, StudioError> {
        let request_id = next_synthesis_id();
        self.active_request.store(request_id, Ordering::SeqCst);
        self.begin_generating()?;

        match self.pipeline.synthesize_text(text, options).await {
            Ok(buffer) => {
                if self.active_request.load(Ordering::SeqCst) != request_id {
                    debug!(request_id, "synthesis result superseded, discarding");
                    return Ok(None);
                }
                Ok(Some((request_id, buffer)))
            }
            Err(e) => {
                if self.active_request.load(Ordering::SeqCst) != request_id {
                    debug!(request_id, "superseded request failed, discarding");
                    return Ok(None);
                }
                Err(self.surface(e))
            }
        }
    }

    /// Synthesize and play a text submission.
    ///
    /// Any active playback is stopped and replaced before the new session
    /// starts.
    pub async fn speak(
        &self,
        text: &str,
        options: &SynthesisOptions,
    ) -> Result<SpeakOutcome, StudioError> {
        let (request_id, buffer) = match self.render_request(text, options).await? {
            Some(rendered) => rendered,
            None => return Ok(SpeakOutcome::Superseded),
        };

        let session = match PlaybackSession::start(buffer) {
            Ok(session) => session,
            Err(e) => {
                let _ = self.state.transition(StudioState::Error {
                    message: e.to_string(),
                });
                return Err(e.into());
            }
        };

        let replaced = self.playback.lock().replace(session);
        if replaced.is_some() {
            debug!("replaced an active playback session");
        }

        self.state.transition(StudioState::Speaking)?;
        Ok(SpeakOutcome::Started { request_id })
    }

    /// Synthesize and export a text submission as a WAV file.
    ///
    /// Returns `None` when superseded. The file is written from fully
    /// encoded bytes in one call; a failed export leaves nothing behind.
    pub async fn export(
        &self,
        text: &str,
        options: &SynthesisOptions,
    ) -> Result<Option<PathBuf>, StudioError> {
        let buffer = match self.render(text, options).await? {
            Some(buffer) => buffer,
            None => return Ok(None),
        };

        let path = match self.exporter.export(&buffer).await {
            Ok(path) => path,
            Err(e) => {
                error!(error = %e, "export failed, no file was written");
                let _ = self.state.transition(StudioState::Error {
                    message: format!("export failed: {e}"),
                });
                return Err(e.into());
            }
        };
        self.state.transition(StudioState::Idle)?;
        Ok(Some(path))
    }

    /// Cancel any in-flight synthesis and stop active playback.
    pub fn stop(&self) {
        // Bump the generation so an awaiting request resolves as superseded.
        self.active_request
            .store(next_synthesis_id(), Ordering::SeqCst);
        if let Some(session) = self.playback.lock().take() {
            session.stop();
        }
        if self.state.current() != StudioState::Idle {
            let _ = self.state.transition(StudioState::Idle);
        }
    }

    /// Release a playback session whose audio has run out, returning the
    /// studio to idle. Call from the embedding UI's tick.
    pub fn reap_finished_playback(&self) {
        let mut slot = self.playback.lock();
        if slot.as_ref().is_some_and(PlaybackSession::is_finished) {
            slot.take();
            drop(slot);
            if self.state.current() == StudioState::Speaking {
                let _ = self.state.transition(StudioState::Idle);
            }
        }
    }

    fn begin_generating(&self) -> Result<(), AppError> {
        // A supersede while already generating keeps the state; the old
        // request resolves through the generation counter instead.
        if self.state.current() != StudioState::Generating {
            self.state.transition(StudioState::Generating)?;
        }
        Ok(())
    }

    /// Map a synthesis failure onto the user-facing error surface.
    fn surface(&self, err: TtsError) -> StudioError {
        let studio_err = if err.is_adapter_failure() {
            error!(error = %err, engine = self.pipeline.engine_name(), "synthesis adapter failure");
            StudioError::SynthesisFailed
        } else {
            error!(error = %err, "synthesis pipeline failure");
            StudioError::Tts(err)
        };
        let _ = self.state.transition(StudioState::Error {
            message: studio_err.to_string(),
        });
        studio_err
    }
}
