//! Injected media capabilities.
//!
//! These traits carry the narrow contracts of the opaque media operations.
//! Production wiring lives in [`crate::backend`]; tests use in-crate fakes.

use std::path::Path;

use async_trait::async_trait;

use vedit_models::{Cue, SpeechSpan, StyleTemplate};

use crate::error::PipelineResult;

/// Detects spans of speech in a video's audio track.
#[async_trait]
pub trait SilenceDetector: Send + Sync {
    /// Return ordered speech spans for `video`. An empty vector means the
    /// track carries no detectable speech.
    async fn detect(&self, video: &Path) -> PipelineResult<Vec<SpeechSpan>>;
}

/// Produces a time-coded transcript from a video's audio track.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Return cues in playback order, 1-based sequentially indexed.
    async fn transcribe(&self, video: &Path) -> PipelineResult<Vec<Cue>>;
}

/// Re-encodes video: span concatenation and styled text overlay.
#[async_trait]
pub trait Compositor: Send + Sync {
    /// Re-assemble `input` from `spans` only, writing `output`.
    async fn concat_spans(
        &self,
        input: &Path,
        output: &Path,
        spans: &[SpeechSpan],
    ) -> PipelineResult<()>;

    /// Overlay styled `cues` onto `input`, writing `output`.
    async fn overlay_cues(
        &self,
        input: &Path,
        output: &Path,
        cues: &[Cue],
        template: &StyleTemplate,
    ) -> PipelineResult<()>;
}
