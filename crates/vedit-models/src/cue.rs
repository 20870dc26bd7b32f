//! Subtitle cues and speech spans.

use serde::{Deserialize, Serialize};

/// A single timed subtitle entry.
///
/// Cue text is always a single line: newlines are collapsed to spaces and
/// the edges trimmed at construction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    /// 1-based sequential index.
    pub index: usize,
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Single-line cue text.
    pub text: String,
}

impl Cue {
    /// Create a cue, normalizing `text` to a single trimmed line.
    pub fn new(index: usize, start: f64, end: f64, text: impl AsRef<str>) -> Self {
        Self {
            index,
            start,
            end,
            text: text.as_ref().trim().replace('\n', " "),
        }
    }

    /// Cue duration in seconds.
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// A half-open `(start, end)` interval of detected speech, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeechSpan {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds (exclusive).
    pub end: f64,
}

impl SpeechSpan {
    /// Create a new span.
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Span duration in seconds.
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_collapses_newlines() {
        let cue = Cue::new(1, 0.0, 1.5, "  hello\nworld\nagain  ");
        assert_eq!(cue.text, "hello world again");
    }

    #[test]
    fn test_cue_duration() {
        let cue = Cue::new(1, 1.0, 3.5, "x");
        assert!((cue.duration() - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_span_duration() {
        let span = SpeechSpan::new(2.0, 5.0);
        assert!((span.duration() - 3.0).abs() < f64::EPSILON);
    }
}
