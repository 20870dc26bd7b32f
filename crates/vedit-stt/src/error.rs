//! Error types for speech-to-text.

use thiserror::Error;

/// Result type for STT operations.
pub type SttResult<T> = Result<T, SttError>;

/// Errors from the speech-to-text subsystem.
#[derive(Debug, Clone, Error)]
pub enum SttError {
    /// The GGML model file was not found at the given path.
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// whisper-rs failed to initialise a context or state.
    #[error("Whisper context initialisation failed: {0}")]
    ContextInit(String),

    /// An error occurred during the inference pass.
    #[error("Transcription error: {0}")]
    Transcription(String),

    /// The supplied audio is shorter than the model can process.
    #[error("Audio too short for transcription — minimum 0.5 s")]
    AudioTooShort,
}
