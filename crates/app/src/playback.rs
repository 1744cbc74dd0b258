//! Exclusive playback over the default output device
//!
//! A `PlaybackSession` is an explicitly owned resource: created on playback
//! start, released on `stop()` or drop. The cpal stream is not `Send`, so a
//! dedicated thread owns it for the session's lifetime, the same way the
//! capture side of a speech pipeline pins its input stream to one thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BufferSize, SampleRate, StreamConfig};
use thiserror::Error;
use tracing::{debug, error, info};
use voxstudio_audio::SampleBuffer;

#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("No audio output device available")]
    DeviceNotFound,

    #[error("Build stream error: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("Play stream error: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("Playback thread terminated before starting")]
    ThreadFailed,
}

/// A handle to the dedicated playback thread.
///
/// At most one session should be live per studio; starting a new one must
/// replace (and thereby stop) the previous session so two streams never
/// drive the device at once.
pub struct PlaybackSession {
    handle: Option<JoinHandle<()>>,
    stop: Arc<AtomicBool>,
    finished: Arc<AtomicBool>,
}

impl PlaybackSession {
    /// Start playing a buffer through the default output device.
    ///
    /// Returns once the stream is live; the audio then plays to completion
    /// on the playback thread unless the session is stopped first.
    pub fn start(buffer: SampleBuffer) -> Result<Self, PlaybackError> {
        let stop = Arc::new(AtomicBool::new(false));
        let finished = Arc::new(AtomicBool::new(false));
        let (ready_tx, ready_rx) = mpsc::channel();

        let thread_stop = stop.clone();
        let thread_finished = finished.clone();
        let handle = thread::Builder::new()
            .name("audio-playback".to_string())
            .spawn(move || {
                run_playback(buffer, thread_stop, thread_finished, ready_tx);
            })
            .map_err(|_| PlaybackError::ThreadFailed)?;

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(Self {
                handle: Some(handle),
                stop,
                finished,
            }),
            Ok(Err(e)) => {
                let _ = handle.join();
                Err(e)
            }
            Err(_) => {
                let _ = handle.join();
                Err(PlaybackError::ThreadFailed)
            }
        }
    }

    /// True once every frame has been handed to the device.
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    /// Stop playback and release the output device.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_playback(
    buffer: SampleBuffer,
    stop: Arc<AtomicBool>,
    finished: Arc<AtomicBool>,
    ready_tx: mpsc::Sender<Result<(), PlaybackError>>,
) {
    let host = cpal::default_host();
    let device = match host.default_output_device() {
        Some(device) => device,
        None => {
            let _ = ready_tx.send(Err(PlaybackError::DeviceNotFound));
            return;
        }
    };

    let channels = buffer.channel_count();
    let config = StreamConfig {
        channels,
        sample_rate: SampleRate(buffer.sample_rate()),
        buffer_size: BufferSize::Default,
    };

    let frame_count = buffer.frame_count();
    let duration_ms = buffer.duration_ms();
    let callback_finished = finished.clone();
    let mut position = 0usize;

    let stream = device.build_output_stream(
        &config,
        move |out: &mut [f32], _| {
            let channels = channels as usize;
            for frame in out.chunks_mut(channels) {
                if position >= frame_count {
                    frame.fill(0.0);
                    callback_finished.store(true, Ordering::SeqCst);
                    continue;
                }
                for (index, sample) in frame.iter_mut().enumerate() {
                    *sample = buffer.channel(index)[position];
                }
                position += 1;
            }
        },
        |err| {
            error!("Playback stream error: {}", err);
        },
        None,
    );

    let stream = match stream {
        Ok(stream) => stream,
        Err(e) => {
            let _ = ready_tx.send(Err(e.into()));
            return;
        }
    };

    if let Err(e) = stream.play() {
        let _ = ready_tx.send(Err(e.into()));
        return;
    }

    info!(frames = frame_count, duration_ms, "playback started");
    let _ = ready_tx.send(Ok(()));

    while !stop.load(Ordering::SeqCst) && !finished.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_millis(20));
    }

    // The finished flag means every frame was queued; give the device a
    // moment to drain before tearing the stream down.
    if finished.load(Ordering::SeqCst) && !stop.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_millis(100));
    }

    debug!("playback stopped, releasing output stream");
    drop(stream);
}
