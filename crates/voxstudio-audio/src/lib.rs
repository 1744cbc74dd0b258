//! Audio pipeline primitives for VoxStudio
//!
//! This crate is the numeric core of the studio: it turns a provider's raw
//! audio payload into normalized sample buffers, stitches buffers from
//! multi-segment synthesis into one continuous recording, and serializes
//! buffers into a canonical uncompressed WAV container for export.
//!
//! All operations here are synchronous, pure transformations with no shared
//! mutable state; the async boundary lives in the synthesis adapters.

pub mod buffer;
pub mod concat;
pub mod error;
pub mod pcm;
pub mod transport;
pub mod wav;

pub use buffer::SampleBuffer;
pub use concat::concatenate;
pub use error::AudioError;
pub use pcm::decode_pcm;
pub use transport::decode_base64;
pub use wav::{encode_wav, EncodedWav, WAV_MIME_TYPE};
