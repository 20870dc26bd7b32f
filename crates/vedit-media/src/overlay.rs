//! Subtitle overlay compositing.
//!
//! Each cue becomes one drawtext filter gated by
//! `enable='between(t,start,end)'`; the whole chain runs in a single
//! encoding pass over the base video. The audio track passes through the
//! encoder untouched apart from the fixed AAC re-encode.

use std::path::Path;

use tracing::{debug, info};

use vedit_models::{Cue, EncodingConfig, StyleTemplate, VerticalAnchor};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;

/// Font family handed to drawtext (resolved through fontconfig).
pub const SUBTITLE_FONT: &str = "Arial";

/// Pixels between the bottom anchor and the bottom edge of the video.
const BOTTOM_MARGIN: u32 = 150;

/// Pixels between the top anchor and the top edge of the video.
const TOP_MARGIN: u32 = 50;

/// Escape text for use inside a quoted drawtext `text` value.
///
/// Backslashes and percent signs are escaped for drawtext's own expansion
/// pass; single quotes terminate the filter-graph quote, so they are spliced
/// in as `'\''`.
pub fn escape_drawtext(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('\'', "'\\''")
}

/// Build the drawtext filter for a single cue.
fn cue_filter(cue: &Cue, template: &StyleTemplate) -> String {
    let (x, y) = match template.anchor {
        VerticalAnchor::Bottom => ("(w-text_w)/2".to_string(), format!("h-{}", BOTTOM_MARGIN)),
        VerticalAnchor::Top => ("(w-text_w)/2".to_string(), TOP_MARGIN.to_string()),
        VerticalAnchor::Center => ("(w-text_w)/2".to_string(), "(h-text_h)/2".to_string()),
    };

    format!(
        "drawtext=text='{}':font={}:fontsize={}:fontcolor={}:bordercolor={}:borderw={}:x={}:y={}:enable='between(t,{:.3},{:.3})'",
        escape_drawtext(&cue.text),
        SUBTITLE_FONT,
        template.font_size,
        template.color,
        template.outline_color,
        template.outline_width,
        x,
        y,
        cue.start,
        cue.end,
    )
}

/// Build the full filter chain for a cue list, `None` when there is nothing
/// to draw.
pub fn build_subtitle_filter(cues: &[Cue], template: &StyleTemplate) -> Option<String> {
    if cues.is_empty() {
        return None;
    }

    Some(
        cues.iter()
            .map(|cue| cue_filter(cue, template))
            .collect::<Vec<_>>()
            .join(","),
    )
}

/// Composite `cues` onto `input`, writing the result to `output`.
///
/// An empty cue list still produces an output (a plain re-encode), matching
/// a subtitle artifact whose blocks were all skipped as malformed.
pub async fn overlay_cues(
    input: &Path,
    output: &Path,
    cues: &[Cue],
    template: &StyleTemplate,
    encoding: &EncodingConfig,
) -> MediaResult<()> {
    debug!(
        input = %input.display(),
        output = %output.display(),
        cues = cues.len(),
        "Rendering subtitle overlays"
    );

    let mut cmd = FfmpegCommand::new(input, output).encoding(encoding);
    if let Some(filter) = build_subtitle_filter(cues, template) {
        cmd = cmd.video_filter(filter);
    }

    FfmpegRunner::new().run(&cmd).await?;

    info!(
        cues = cues.len(),
        output = %output.display(),
        "Subtitle render complete"
    );

    Ok(())
}
