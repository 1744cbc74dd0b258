//! WAV export
//!
//! Encoding is all-or-nothing: the file bytes are fully built in memory and
//! written in a single call, so no partial or corrupt artifact can ever
//! appear on disk. Writes are fire-and-forget with no retry.

use std::io;
use std::path::{Path, PathBuf};

use tracing::info;
use voxstudio_audio::{encode_wav, SampleBuffer};
use voxstudio_foundation::StudioConfig;

pub struct WavExporter {
    dir: PathBuf,
    prefix: String,
}

impl WavExporter {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    pub fn from_config(config: &StudioConfig) -> Self {
        Self::new(&config.export_dir, &config.export_prefix)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write a buffer as `<prefix>-<unix-timestamp-ms>.wav` and return the
    /// path.
    pub async fn export(&self, buffer: &SampleBuffer) -> io::Result<PathBuf> {
        let wav = encode_wav(buffer);
        let filename =
            wav.suggested_filename(&self.prefix, chrono::Utc::now().timestamp_millis());
        let path = self.dir.join(filename);
        tokio::fs::write(&path, wav.as_bytes()).await?;
        info!(
            path = %path.display(),
            bytes = wav.len(),
            mime = wav.mime_type(),
            "exported recording"
        );
        Ok(path)
    }
}
