//! Processing endpoint handlers.
//!
//! Each handler is a thin shim over one pipeline stage: extract the query,
//! run the stage on the request task, map the result. Processing is
//! synchronous within the request; the connection stays open for the full
//! encode.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use vedit_models::DEFAULT_TEMPLATE;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct FilenameQuery {
    pub filename: String,
}

#[derive(Deserialize)]
pub struct RenderQuery {
    pub filename: String,
    #[serde(default = "default_template")]
    pub template: String,
}

fn default_template() -> String {
    DEFAULT_TEMPLATE.to_string()
}

#[derive(Serialize)]
pub struct TrimResponse {
    pub message: String,
    pub output_file: String,
}

#[derive(Serialize)]
pub struct SubtitlesResponse {
    pub message: String,
    pub subtitle_file: String,
}

#[derive(Serialize)]
pub struct RenderResponse {
    pub message: String,
    pub output_file: String,
}

/// Remove silent passages from a stored video.
pub async fn remove_silence(
    State(state): State<AppState>,
    Query(query): Query<FilenameQuery>,
) -> ApiResult<Json<TrimResponse>> {
    let output_file = state.pipeline.trim_silence(&query.filename).await?;

    Ok(Json(TrimResponse {
        message: "Silence removed".to_string(),
        output_file,
    }))
}

/// Generate a subtitle artifact for a stored video.
pub async fn generate_subtitles(
    State(state): State<AppState>,
    Query(query): Query<FilenameQuery>,
) -> ApiResult<Json<SubtitlesResponse>> {
    let subtitle_file = state.pipeline.generate_subtitles(&query.filename).await?;

    Ok(Json(SubtitlesResponse {
        message: "Subtitles generated".to_string(),
        subtitle_file,
    }))
}

/// Render a stored video with its subtitles and a style template.
pub async fn render_with_subtitles(
    State(state): State<AppState>,
    Query(query): Query<RenderQuery>,
) -> ApiResult<Json<RenderResponse>> {
    let output_file = state
        .pipeline
        .render_with_subtitles(&query.filename, &query.template)
        .await?;

    Ok(Json(RenderResponse {
        message: "Render complete".to_string(),
        output_file,
    }))
}
