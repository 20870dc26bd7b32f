//! Production capability implementations backed by FFmpeg and Whisper.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use vedit_media::silence::{detect_speech_spans, SilenceConfig};
use vedit_media::{audio, overlay, silence};
use vedit_models::{Cue, EncodingConfig, SpeechSpan, StyleTemplate};
use vedit_stt::{SttError, WhisperEngine};

use crate::capability::{Compositor, SilenceDetector, Transcriber};
use crate::error::{PipelineError, PipelineResult};

/// Silence detector using mean-loudness thresholding over extracted audio.
#[derive(Debug, Default)]
pub struct EnergySilenceDetector {
    config: SilenceConfig,
}

impl EnergySilenceDetector {
    pub fn new(config: SilenceConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SilenceDetector for EnergySilenceDetector {
    async fn detect(&self, video: &Path) -> PipelineResult<Vec<SpeechSpan>> {
        // The extract guard removes the temp waveform on every exit path
        let extract = audio::extract_audio(video).await?;
        let samples = extract.samples().await?;

        let spans = detect_speech_spans(&samples, audio::AUDIO_SAMPLE_RATE, &self.config);

        debug!(
            video = %video.display(),
            spans = spans.len(),
            "Silence detection complete"
        );

        Ok(spans)
    }
}

/// Transcriber running a GGML whisper model over extracted audio.
///
/// The model is loaded lazily on first use and shared for the rest of the
/// process lifetime. Inference runs on a blocking thread.
pub struct WhisperTranscriber {
    model_path: PathBuf,
    engine: OnceCell<Arc<WhisperEngine>>,
}

impl WhisperTranscriber {
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            engine: OnceCell::new(),
        }
    }

    async fn engine(&self) -> PipelineResult<Arc<WhisperEngine>> {
        let engine = self
            .engine
            .get_or_try_init(|| async {
                let path = self.model_path.clone();
                tokio::task::spawn_blocking(move || WhisperEngine::load(path).map(Arc::new))
                    .await
                    .map_err(|e| SttError::ContextInit(e.to_string()))?
            })
            .await?;

        Ok(Arc::clone(engine))
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    async fn transcribe(&self, video: &Path) -> PipelineResult<Vec<Cue>> {
        let extract = audio::extract_audio(video).await?;
        let samples = extract.samples().await?;

        let engine = self.engine().await?;
        let segments = tokio::task::spawn_blocking(move || engine.transcribe(&samples))
            .await
            .map_err(|e| SttError::Transcription(e.to_string()))??;

        let cues = segments
            .iter()
            .enumerate()
            .map(|(i, seg)| Cue::new(i + 1, seg.start, seg.end, &seg.text))
            .collect::<Vec<_>>();

        debug!(
            video = %video.display(),
            cues = cues.len(),
            "Transcription complete"
        );

        Ok(cues)
    }
}

/// Compositor shelling out to FFmpeg with the fixed H.264/AAC codec pair.
#[derive(Debug, Default)]
pub struct FfmpegCompositor {
    encoding: EncodingConfig,
}

impl FfmpegCompositor {
    pub fn new(encoding: EncodingConfig) -> Self {
        Self { encoding }
    }
}

#[async_trait]
impl Compositor for FfmpegCompositor {
    async fn concat_spans(
        &self,
        input: &Path,
        output: &Path,
        spans: &[SpeechSpan],
    ) -> PipelineResult<()> {
        silence::concat_spans(input, output, spans, &self.encoding)
            .await
            .map_err(PipelineError::from)
    }

    async fn overlay_cues(
        &self,
        input: &Path,
        output: &Path,
        cues: &[Cue],
        template: &StyleTemplate,
    ) -> PipelineResult<()> {
        overlay::overlay_cues(input, output, cues, template, &self.encoding)
            .await
            .map_err(PipelineError::from)
    }
}
