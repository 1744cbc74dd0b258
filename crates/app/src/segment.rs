//! Text segmentation
//!
//! Newlines are segment breaks: each non-blank line becomes one synthesis
//! request, and the resulting buffers are concatenated in order.

pub fn split_segments(text: &str) -> Vec<&str> {
    text.split('\n').filter(|s| !s.trim().is_empty()).collect()
}
