//! VoxStudio orchestration layer
//!
//! Glues the synthesis engines to the audio core: splits submitted text
//! into segments, drives an engine per segment, stitches the results, and
//! either plays the recording through the default output device or exports
//! it as a WAV file. Consumed as a library by an embedding UI; there is no
//! CLI.

pub mod controller;
pub mod export;
pub mod logging;
pub mod pipeline;
pub mod playback;
pub mod segment;

pub use controller::{SpeakOutcome, StudioController, StudioError};
pub use export::WavExporter;
pub use logging::init_logging;
pub use pipeline::{variant_options, SynthesisPipeline};
pub use playback::{PlaybackError, PlaybackSession};
pub use segment::split_segments;
