//! Pipeline error types.

use thiserror::Error;

use vedit_media::MediaError;
use vedit_models::SubtitleParseError;
use vedit_store::StoreError;
use vedit_stt::SttError;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors from pipeline stages.
///
/// The first four variants are the reported tier: the request failed
/// gracefully and the caller gets a structured response. The rest are
/// faults that terminate the request as an internal failure.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Artifact not found: {0}")]
    NotFound(String),

    #[error("Subtitle artifact not found: {0}")]
    SubtitlesNotFound(String),

    #[error("Unknown style template: {0}")]
    TemplateNotFound(String),

    #[error("No speech detected in audio track")]
    InsufficientAudio,

    #[error("Subtitle parse error: {0}")]
    Subtitle(#[from] SubtitleParseError),

    #[error("Media error: {0}")]
    Media(MediaError),

    #[error("Speech-to-text error: {0}")]
    Stt(#[from] SttError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl PipelineError {
    /// Whether this error is reported gracefully rather than as a fault.
    pub fn is_reported(&self) -> bool {
        matches!(
            self,
            PipelineError::NotFound(_)
                | PipelineError::SubtitlesNotFound(_)
                | PipelineError::TemplateNotFound(_)
                | PipelineError::InsufficientAudio
        )
    }
}

impl From<MediaError> for PipelineError {
    fn from(e: MediaError) -> Self {
        match e {
            // Every span fell outside the container: nothing worth keeping
            MediaError::NoSpans => PipelineError::InsufficientAudio,
            other => PipelineError::Media(other),
        }
    }
}
