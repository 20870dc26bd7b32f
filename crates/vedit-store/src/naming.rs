//! Artifact naming conventions.
//!
//! These prefixes are load-bearing: the renderer locates a video's
//! transcript purely by the `<video>.srt` convention, and callers chain
//! stages by the names returned here. They must stay bit-exact.

use uuid::Uuid;

/// Reduce an uploaded filename to its final path component and strip
/// traversal sequences. Falls back to `upload` when nothing survives.
pub fn sanitize_filename(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original)
        .replace("..", "")
        .trim()
        .to_string();

    if base.is_empty() {
        "upload".to_string()
    } else {
        base
    }
}

/// Name for a fresh upload: `<uuid-v4>_<sanitized-filename>`.
pub fn upload_name(original: &str) -> String {
    format!("{}_{}", Uuid::new_v4(), sanitize_filename(original))
}

/// Name for the silence-trimmed output of `input`.
pub fn trimmed_name(input: &str) -> String {
    format!("nosilence_{}", input)
}

/// Name for the subtitle artifact associated with `input`.
pub fn subtitle_name(input: &str) -> String {
    format!("{}.srt", input)
}

/// Name for the subtitle-rendered output of `input`.
pub fn rendered_name(input: &str) -> String {
    format!("final_{}", input)
}
