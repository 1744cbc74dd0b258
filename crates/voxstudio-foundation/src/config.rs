//! Studio configuration
//!
//! Loaded from an optional TOML file with `VOXSTUDIO_*` environment
//! variables layered on top, so an embedding UI can ship defaults and users
//! can still override per session.

use std::path::Path;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Filename prefix for exported recordings
    pub export_prefix: String,
    /// Directory exported recordings are written to
    pub export_dir: String,
    /// Voice id used by the remote engine when a request names none
    pub default_remote_voice: String,
    /// Voice id used by the local engine when a request names none
    pub default_local_voice: Option<String>,
    /// Bound on a single provider request, in seconds
    pub request_timeout_secs: u64,
    /// Retry attempts the remote adapter may make on transient failures
    pub max_retries: u32,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            export_prefix: "voxstudio".to_string(),
            export_dir: ".".to_string(),
            default_remote_voice: "Kore".to_string(),
            default_local_voice: None,
            request_timeout_secs: 30,
            max_retries: 3,
        }
    }
}

impl StudioConfig {
    /// Load configuration, layering an optional TOML file under
    /// `VOXSTUDIO_*` environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        builder
            .add_source(Environment::with_prefix("VOXSTUDIO"))
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| AppError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_sensible() {
        let cfg = StudioConfig::default();
        assert_eq!(cfg.export_prefix, "voxstudio");
        assert_eq!(cfg.default_remote_voice, "Kore");
        assert_eq!(cfg.request_timeout_secs, 30);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = StudioConfig::load(None).unwrap();
        assert_eq!(cfg.export_prefix, StudioConfig::default().export_prefix);
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "export_prefix = \"studio\"\nrequest_timeout_secs = 10"
        )
        .unwrap();
        let cfg = StudioConfig::load(Some(file.path())).unwrap();
        assert_eq!(cfg.export_prefix, "studio");
        assert_eq!(cfg.request_timeout_secs, 10);
        // Untouched fields keep their defaults.
        assert_eq!(cfg.default_remote_voice, "Kore");
    }
}
