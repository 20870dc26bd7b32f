//! The three pipeline stages.

use std::sync::Arc;

use tracing::{info, warn};

use vedit_models::{subtitle, TemplateCatalog};
use vedit_store::{naming, ArtifactStore};

use crate::capability::{Compositor, SilenceDetector, Transcriber};
use crate::error::{PipelineError, PipelineResult};

/// Stage orchestrator.
///
/// Holds the artifact store, the fixed template catalog, and the three
/// injected media capabilities. Every method is a self-contained
/// read-process-write cycle; outputs are staged and committed with an
/// atomic rename so a failed stage leaves nothing under the final name.
pub struct Pipeline {
    store: Arc<ArtifactStore>,
    catalog: Arc<TemplateCatalog>,
    detector: Arc<dyn SilenceDetector>,
    transcriber: Arc<dyn Transcriber>,
    compositor: Arc<dyn Compositor>,
}

impl Pipeline {
    pub fn new(
        store: Arc<ArtifactStore>,
        catalog: Arc<TemplateCatalog>,
        detector: Arc<dyn SilenceDetector>,
        transcriber: Arc<dyn Transcriber>,
        compositor: Arc<dyn Compositor>,
    ) -> Self {
        Self {
            store,
            catalog,
            detector,
            transcriber,
            compositor,
        }
    }

    /// Remove silent passages from a stored video.
    ///
    /// Returns the trimmed artifact's name (`nosilence_<input>`).
    pub async fn trim_silence(&self, name: &str) -> PipelineResult<String> {
        if !self.store.exists(name).await {
            return Err(PipelineError::NotFound(name.to_string()));
        }
        let input = self.store.path_for(name)?;

        let spans = self.detector.detect(&input).await?;
        if spans.is_empty() {
            return Err(PipelineError::InsufficientAudio);
        }

        let output_name = naming::trimmed_name(name);
        let staging = self.store.staging_path(&output_name)?;

        match self.compositor.concat_spans(&input, &staging, &spans).await {
            Ok(()) => {
                self.store.commit(&staging, &output_name).await?;
                info!(input = name, output = %output_name, spans = spans.len(), "Silence trimmed");
                Ok(output_name)
            }
            Err(e) => {
                discard_staging(&staging).await;
                Err(e)
            }
        }
    }

    /// Transcribe a stored video into a subtitle artifact.
    ///
    /// Returns the subtitle artifact's name (`<input>.srt`).
    pub async fn generate_subtitles(&self, name: &str) -> PipelineResult<String> {
        if !self.store.exists(name).await {
            return Err(PipelineError::NotFound(name.to_string()));
        }
        let input = self.store.path_for(name)?;

        let cues = self.transcriber.transcribe(&input).await?;

        let output_name = naming::subtitle_name(name);
        self.store
            .write(&output_name, subtitle::write_cues(&cues).as_bytes())
            .await?;

        info!(input = name, output = %output_name, cues = cues.len(), "Subtitles generated");
        Ok(output_name)
    }

    /// Overlay a stored video's subtitles onto it using a style template.
    ///
    /// The template lookup precedes all file I/O. Returns the rendered
    /// artifact's name (`final_<input>`).
    pub async fn render_with_subtitles(
        &self,
        name: &str,
        template_name: &str,
    ) -> PipelineResult<String> {
        let template = self
            .catalog
            .get(template_name)
            .ok_or_else(|| PipelineError::TemplateNotFound(template_name.to_string()))?
            .clone();

        if !self.store.exists(name).await {
            return Err(PipelineError::NotFound(name.to_string()));
        }
        let subtitle_name = naming::subtitle_name(name);
        if !self.store.exists(&subtitle_name).await {
            return Err(PipelineError::SubtitlesNotFound(subtitle_name));
        }

        let input = self.store.path_for(name)?;
        let content = self.store.read_to_string(&subtitle_name).await?;
        let cues = subtitle::parse_cues(&content)?;

        let output_name = naming::rendered_name(name);
        let staging = self.store.staging_path(&output_name)?;

        match self
            .compositor
            .overlay_cues(&input, &staging, &cues, &template)
            .await
        {
            Ok(()) => {
                self.store.commit(&staging, &output_name).await?;
                info!(
                    input = name,
                    output = %output_name,
                    template = template_name,
                    cues = cues.len(),
                    "Subtitles rendered"
                );
                Ok(output_name)
            }
            Err(e) => {
                discard_staging(&staging).await;
                Err(e)
            }
        }
    }
}

/// Best-effort removal of a staging file after a failed stage.
async fn discard_staging(staging: &std::path::Path) {
    if let Err(e) = tokio::fs::remove_file(staging).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %staging.display(), error = %e, "Failed to remove staging file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::Path;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tempfile::TempDir;

    use vedit_models::{Cue, SpeechSpan, StyleTemplate};

    struct FakeDetector {
        spans: Vec<SpeechSpan>,
    }

    #[async_trait]
    impl SilenceDetector for FakeDetector {
        async fn detect(&self, _video: &Path) -> PipelineResult<Vec<SpeechSpan>> {
            Ok(self.spans.clone())
        }
    }

    struct FakeTranscriber {
        cues: Vec<Cue>,
    }

    #[async_trait]
    impl Transcriber for FakeTranscriber {
        async fn transcribe(&self, _video: &Path) -> PipelineResult<Vec<Cue>> {
            Ok(self.cues.clone())
        }
    }

    /// Records calls and writes marker bytes where real encodes would go.
    #[derive(Default)]
    struct FakeCompositor {
        calls: Mutex<Vec<String>>,
        fail: bool,
    }

    impl FakeCompositor {
        fn failing() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Compositor for FakeCompositor {
        async fn concat_spans(
            &self,
            _input: &Path,
            output: &Path,
            spans: &[SpeechSpan],
        ) -> PipelineResult<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("concat:{}", spans.len()));
            if self.fail {
                return Err(PipelineError::Media(vedit_media::MediaError::FfmpegNotFound));
            }
            tokio::fs::write(output, b"trimmed").await.unwrap();
            Ok(())
        }

        async fn overlay_cues(
            &self,
            _input: &Path,
            output: &Path,
            cues: &[Cue],
            _template: &StyleTemplate,
        ) -> PipelineResult<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("overlay:{}", cues.len()));
            if self.fail {
                return Err(PipelineError::Media(vedit_media::MediaError::FfmpegNotFound));
            }
            tokio::fs::write(output, b"rendered").await.unwrap();
            Ok(())
        }
    }

    struct Fixture {
        _dir: TempDir,
        store: Arc<ArtifactStore>,
        compositor: Arc<FakeCompositor>,
        pipeline: Pipeline,
    }

    async fn fixture(
        spans: Vec<SpeechSpan>,
        cues: Vec<Cue>,
        compositor: FakeCompositor,
    ) -> Fixture {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(ArtifactStore::open(dir.path()).await.unwrap());
        let compositor = Arc::new(compositor);

        let pipeline = Pipeline::new(
            Arc::clone(&store),
            Arc::new(TemplateCatalog::builtin()),
            Arc::new(FakeDetector { spans }),
            Arc::new(FakeTranscriber { cues }),
            Arc::clone(&compositor) as Arc<dyn Compositor>,
        );

        Fixture {
            _dir: dir,
            store,
            compositor,
            pipeline,
        }
    }

    fn speech() -> Vec<SpeechSpan> {
        vec![SpeechSpan::new(2.0, 5.0), SpeechSpan::new(6.0, 8.0)]
    }

    fn sample_cues() -> Vec<Cue> {
        vec![
            Cue::new(1, 0.0, 2.0, "first"),
            Cue::new(2, 2.0, 4.0, "second"),
        ]
    }

    async fn artifact_count(store: &ArtifactStore) -> usize {
        let mut entries = tokio::fs::read_dir(store.root()).await.unwrap();
        let mut count = 0;
        while entries.next_entry().await.unwrap().is_some() {
            count += 1;
        }
        count
    }

    #[tokio::test]
    async fn test_trim_silence_writes_trimmed_artifact() {
        let f = fixture(speech(), vec![], FakeCompositor::default()).await;
        f.store.write("in.mp4", b"video").await.unwrap();

        let out = f.pipeline.trim_silence("in.mp4").await.unwrap();

        assert_eq!(out, "nosilence_in.mp4");
        assert_eq!(f.store.read(&out).await.unwrap(), b"trimmed");
        // Input untouched
        assert_eq!(f.store.read("in.mp4").await.unwrap(), b"video");
    }

    #[tokio::test]
    async fn test_trim_silence_not_found_performs_no_writes() {
        let f = fixture(speech(), vec![], FakeCompositor::default()).await;

        let err = f.pipeline.trim_silence("missing.mp4").await.unwrap_err();

        assert!(matches!(err, PipelineError::NotFound(_)));
        assert_eq!(f.compositor.call_count(), 0);
        assert_eq!(artifact_count(&f.store).await, 0);
    }

    #[tokio::test]
    async fn test_trim_silence_insufficient_audio() {
        let f = fixture(vec![], vec![], FakeCompositor::default()).await;
        f.store.write("in.mp4", b"video").await.unwrap();

        let err = f.pipeline.trim_silence("in.mp4").await.unwrap_err();

        assert!(matches!(err, PipelineError::InsufficientAudio));
        assert_eq!(f.compositor.call_count(), 0);
        assert!(!f.store.exists("nosilence_in.mp4").await);
    }

    #[tokio::test]
    async fn test_trim_silence_failure_leaves_no_output() {
        let f = fixture(speech(), vec![], FakeCompositor::failing()).await;
        f.store.write("in.mp4", b"video").await.unwrap();

        let err = f.pipeline.trim_silence("in.mp4").await.unwrap_err();

        assert!(!err.is_reported());
        assert!(!f.store.exists("nosilence_in.mp4").await);
        // Only the input remains; the staging file was discarded
        assert_eq!(artifact_count(&f.store).await, 1);
    }

    #[tokio::test]
    async fn test_generate_subtitles_round_trips() {
        let f = fixture(vec![], sample_cues(), FakeCompositor::default()).await;
        f.store.write("in.mp4", b"video").await.unwrap();

        let out = f.pipeline.generate_subtitles("in.mp4").await.unwrap();

        assert_eq!(out, "in.mp4.srt");
        let content = f.store.read_to_string(&out).await.unwrap();
        let parsed = subtitle::parse_cues(&content).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].text, "first");
    }

    #[tokio::test]
    async fn test_generate_subtitles_not_found() {
        let f = fixture(vec![], sample_cues(), FakeCompositor::default()).await;

        let err = f.pipeline.generate_subtitles("missing.mp4").await.unwrap_err();

        assert!(matches!(err, PipelineError::NotFound(_)));
        assert_eq!(artifact_count(&f.store).await, 0);
    }

    #[tokio::test]
    async fn test_render_unknown_template_precedes_all_io() {
        let f = fixture(vec![], vec![], FakeCompositor::default()).await;
        // Neither the video nor the subtitles exist; the template check
        // must still win.
        let err = f
            .pipeline
            .render_with_subtitles("missing.mp4", "no_such_template")
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::TemplateNotFound(_)));
        assert_eq!(f.compositor.call_count(), 0);
        assert_eq!(artifact_count(&f.store).await, 0);
    }

    #[tokio::test]
    async fn test_render_missing_subtitles() {
        let f = fixture(vec![], vec![], FakeCompositor::default()).await;
        f.store.write("in.mp4", b"video").await.unwrap();

        let err = f
            .pipeline
            .render_with_subtitles("in.mp4", "classic")
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::SubtitlesNotFound(_)));
        assert_eq!(f.compositor.call_count(), 0);
    }

    #[tokio::test]
    async fn test_render_writes_final_artifact() {
        let f = fixture(vec![], vec![], FakeCompositor::default()).await;
        f.store.write("in.mp4", b"video").await.unwrap();
        f.store
            .write("in.mp4.srt", subtitle::write_cues(&sample_cues()).as_bytes())
            .await
            .unwrap();

        let out = f
            .pipeline
            .render_with_subtitles("in.mp4", "classic")
            .await
            .unwrap();

        assert_eq!(out, "final_in.mp4");
        assert_eq!(f.store.read(&out).await.unwrap(), b"rendered");
        assert_eq!(f.compositor.calls.lock().unwrap()[0], "overlay:2");
    }

    #[tokio::test]
    async fn test_render_skips_malformed_blocks() {
        let f = fixture(vec![], vec![], FakeCompositor::default()).await;
        f.store.write("in.mp4", b"video").await.unwrap();
        // Second block has only 2 lines and must be skipped, not fatal
        let srt = "1\n0.00 --> 1.00\ngood\n\n2\n1.00 --> 2.00\n";
        f.store.write("in.mp4.srt", srt.as_bytes()).await.unwrap();

        f.pipeline
            .render_with_subtitles("in.mp4", "classic")
            .await
            .unwrap();

        assert_eq!(f.compositor.calls.lock().unwrap()[0], "overlay:1");
    }
}
