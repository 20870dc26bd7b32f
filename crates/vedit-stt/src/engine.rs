//! Whisper engine wrapping `whisper_rs::WhisperContext`.

use std::path::Path;

use tracing::{debug, info};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::error::{SttError, SttResult};

/// Minimum audio length: 0.5 s at 16 kHz.
const MIN_AUDIO_SAMPLES: usize = 8_000;

/// A time-aligned text chunk produced by Whisper.
#[derive(Debug, Clone, PartialEq)]
pub struct SttSegment {
    /// Segment start in seconds from the start of the audio.
    pub start: f64,
    /// Segment end in seconds.
    pub end: f64,
    /// Segment text as reported by the model.
    pub text: String,
}

/// Speech-to-text engine backed by a GGML whisper model.
///
/// A new `WhisperState` is created for every [`transcribe`] call so the
/// engine can be shared across threads without locking.
///
/// [`transcribe`]: WhisperEngine::transcribe
pub struct WhisperEngine {
    ctx: WhisperContext,
    n_threads: i32,
}

impl std::fmt::Debug for WhisperEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhisperEngine")
            .field("n_threads", &self.n_threads)
            .finish_non_exhaustive()
    }
}

// `WhisperContext` holds a raw pointer internally but the model weights are
// read-only after loading; whisper-rs declares the context Send+Sync.
// SAFETY: WhisperContext is Send+Sync as declared by whisper-rs.
unsafe impl Send for WhisperEngine {}
unsafe impl Sync for WhisperEngine {}

impl WhisperEngine {
    /// Load a GGML model from `model_path` and prepare it for inference.
    ///
    /// # Errors
    ///
    /// - [`SttError::ModelNotFound`] — `model_path` does not exist.
    /// - [`SttError::ContextInit`] — whisper-rs failed to load the file.
    pub fn load(model_path: impl AsRef<Path>) -> SttResult<Self> {
        let path = model_path.as_ref();

        if !path.exists() {
            return Err(SttError::ModelNotFound(path.display().to_string()));
        }

        let path_str = path.to_str().ok_or_else(|| {
            SttError::ModelNotFound(format!(
                "model path contains non-UTF-8 characters: {}",
                path.display()
            ))
        })?;

        info!(model = %path.display(), "Loading whisper model");

        let ctx_params = WhisperContextParameters::default();
        let ctx = WhisperContext::new_with_params(path_str, ctx_params)
            .map_err(|e| SttError::ContextInit(e.to_string()))?;

        Ok(Self {
            ctx,
            n_threads: optimal_threads(),
        })
    }

    /// Transcribe 16 kHz mono f32 PCM into time-aligned segments.
    ///
    /// Language is auto-detected. This is a blocking, CPU-bound call; run
    /// it on a blocking thread when called from async code.
    pub fn transcribe(&self, audio: &[f32]) -> SttResult<Vec<SttSegment>> {
        if audio.len() < MIN_AUDIO_SAMPLES {
            return Err(SttError::AudioTooShort);
        }

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_language(None);
        params.set_n_threads(self.n_threads);
        params.set_print_progress(false);
        params.set_print_realtime(false);

        let mut state = self
            .ctx
            .create_state()
            .map_err(|e| SttError::ContextInit(e.to_string()))?;

        state
            .full(params, audio)
            .map_err(|e| SttError::Transcription(e.to_string()))?;

        let n_segments = state
            .full_n_segments()
            .map_err(|e| SttError::Transcription(e.to_string()))?;

        let mut segments = Vec::with_capacity(n_segments as usize);

        for i in 0..n_segments {
            let text = state
                .full_get_segment_text(i)
                .map_err(|e| SttError::Transcription(format!("segment {i}: {e}")))?;

            // Timestamps are in centiseconds
            let t0 = state.full_get_segment_t0(i).unwrap_or(0).max(0);
            let t1 = state.full_get_segment_t1(i).unwrap_or(0).max(0);

            segments.push(SttSegment {
                start: t0 as f64 / 100.0,
                end: t1 as f64 / 100.0,
                text,
            });
        }

        debug!(segments = segments.len(), "Transcription complete");

        Ok(segments)
    }
}

/// Threads handed to Whisper, capped at 8 to avoid diminishing returns.
fn optimal_threads() -> i32 {
    std::thread::available_parallelism()
        .map(|n| n.get().min(8) as i32)
        .unwrap_or(4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_model() {
        let result = WhisperEngine::load("/nonexistent/model.bin");
        assert!(matches!(result, Err(SttError::ModelNotFound(_))));
    }

    #[test]
    fn test_optimal_threads_bounds() {
        let t = optimal_threads();
        assert!((1..=8).contains(&t));
    }

    #[test]
    fn test_error_display() {
        let e = SttError::ModelNotFound("/some/path.bin".into());
        assert!(e.to_string().contains("/some/path.bin"));
    }
}
