//! Application state.

use std::sync::Arc;

use tracing::warn;

use vedit_models::TemplateCatalog;
use vedit_pipeline::{EnergySilenceDetector, FfmpegCompositor, Pipeline, WhisperTranscriber};
use vedit_store::ArtifactStore;

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub store: Arc<ArtifactStore>,
    pub catalog: Arc<TemplateCatalog>,
    pub pipeline: Arc<Pipeline>,
}

impl AppState {
    /// Create new application state.
    pub async fn new(config: ApiConfig) -> anyhow::Result<Self> {
        if vedit_media::check_ffmpeg().is_err() {
            warn!("ffmpeg not found in PATH; processing endpoints will fail");
        }

        let store = Arc::new(ArtifactStore::open(&config.artifact_dir).await?);
        let catalog = Arc::new(TemplateCatalog::builtin());

        let pipeline = Arc::new(Pipeline::new(
            Arc::clone(&store),
            Arc::clone(&catalog),
            Arc::new(EnergySilenceDetector::default()),
            Arc::new(WhisperTranscriber::new(&config.whisper_model)),
            Arc::new(FfmpegCompositor::default()),
        ));

        Ok(Self {
            config,
            store,
            catalog,
            pipeline,
        })
    }
}
