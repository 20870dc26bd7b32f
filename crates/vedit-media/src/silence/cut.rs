//! Cut speech spans out of a video and concatenate them.
//!
//! Each span is extracted from the original video with two-pass seeking
//! (fast input seek close to the span, accurate output seek for the exact
//! frame) and re-encoded, then the pieces are joined with the concat
//! demuxer using stream copy. Input seeking alone would snap to keyframes
//! and duplicate frames at the joins.

use std::path::Path;

use tracing::{debug, info};

use vedit_models::{EncodingConfig, SpeechSpan};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};
use crate::probe;

/// Seconds of input-side seek headroom before the accurate output seek.
const FAST_SEEK_HEADROOM: f64 = 5.0;

/// Re-assemble `input` from `spans` only, writing the result to `output`.
///
/// Spans are clamped to the probed container duration; spans that start at
/// or beyond it are dropped. Returns [`MediaError::NoSpans`] when nothing
/// remains to concatenate.
pub async fn concat_spans(
    input: &Path,
    output: &Path,
    spans: &[SpeechSpan],
    encoding: &EncodingConfig,
) -> MediaResult<()> {
    let container_duration = probe::get_duration(input).await?;

    let spans: Vec<SpeechSpan> = spans
        .iter()
        .filter(|s| s.start < container_duration)
        .map(|s| SpeechSpan::new(s.start, s.end.min(container_duration)))
        .filter(|s| s.duration() > 0.0)
        .collect();

    if spans.is_empty() {
        return Err(MediaError::NoSpans);
    }

    debug!(
        input = %input.display(),
        output = %output.display(),
        spans = spans.len(),
        "Cutting speech spans"
    );

    let temp_dir = tempfile::tempdir()?;
    let mut segment_paths = Vec::new();

    for (i, span) in spans.iter().enumerate() {
        let seg_path = temp_dir.path().join(format!("seg_{:04}.mp4", i));

        // Fast input seek to get close, then accurate output seek
        let fast_seek = (span.start - FAST_SEEK_HEADROOM).max(0.0);
        let accurate_seek = span.start - fast_seek;

        debug!(
            segment = i,
            start = span.start,
            duration = span.duration(),
            "Extracting span"
        );

        let cmd = FfmpegCommand::new(input, &seg_path)
            .seek(fast_seek)
            .output_seek(accurate_seek)
            .duration(span.duration())
            .encoding(encoding)
            .output_args(["-avoid_negative_ts", "make_zero"]);

        FfmpegRunner::new().run(&cmd).await?;
        segment_paths.push(seg_path);
    }

    // Concat demuxer list file
    let concat_list = temp_dir.path().join("concat.txt");
    let list_content: String = segment_paths
        .iter()
        .map(|p| format!("file '{}'\n", p.display()))
        .collect();
    tokio::fs::write(&concat_list, &list_content).await?;

    let cmd = FfmpegCommand::new(&concat_list, output)
        .input_args(["-f", "concat", "-safe", "0"])
        .codec_copy()
        .output_args(["-movflags", "+faststart"]);

    FfmpegRunner::new().run(&cmd).await?;

    info!(
        spans = spans.len(),
        output = %output.display(),
        "Span concatenation complete"
    );

    // temp_dir and its segment files are removed on drop
    Ok(())
}
