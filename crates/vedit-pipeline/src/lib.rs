//! Stage orchestration for the editing pipeline.
//!
//! Each stage is a self-contained read-process-write cycle against the
//! artifact store; no state survives between requests. The opaque media
//! operations (silence detection, speech-to-text, compositing) are injected
//! as capabilities so the orchestration can be tested with fakes:
//!
//! - [`SilenceDetector`] — video path to speech spans
//! - [`Transcriber`] — video path to time-coded cues
//! - [`Compositor`] — span concatenation and styled cue overlay
//!
//! Errors come in two tiers: reported errors (missing artifacts, unknown
//! template, no detectable speech) surface as typed variants the API maps
//! to 4xx responses; everything else is a fault.

pub mod backend;
pub mod capability;
pub mod error;
pub mod pipeline;

pub use backend::{EnergySilenceDetector, FfmpegCompositor, WhisperTranscriber};
pub use capability::{Compositor, SilenceDetector, Transcriber};
pub use error::{PipelineError, PipelineResult};
pub use pipeline::Pipeline;
