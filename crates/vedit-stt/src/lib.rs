//! Whisper speech-to-text engine.
//!
//! Wraps `whisper_rs::WhisperContext` around a fixed GGML model and turns
//! 16 kHz mono f32 PCM into time-aligned segments. Model weights are
//! read-only after loading, so one engine is shared across requests; a
//! fresh `WhisperState` is created per call.

pub mod engine;
pub mod error;

pub use engine::{SttSegment, WhisperEngine};
pub use error::{SttError, SttResult};
