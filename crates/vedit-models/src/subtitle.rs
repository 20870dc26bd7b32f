//! The subtitle interchange format.
//!
//! This is NOT standard SRT. Times are raw fractional seconds with exactly
//! two decimals (`12.34 --> 15.60`), not `hh:mm:ss,mmm`. The renderer parses
//! exactly this format, so the writer must reproduce it bit-exact:
//!
//! ```text
//! 1
//! 0.00 --> 2.50
//! some single-line text
//!
//! 2
//! ...
//! ```
//!
//! Blocks are separated by one blank line. The parser skips blocks with
//! fewer than 3 lines, ignores the index line's content (cues are
//! renumbered in file order), reads only the third line as text, and
//! errors on unparseable time lines.

use thiserror::Error;

use crate::cue::Cue;

/// Errors from parsing the subtitle interchange format.
#[derive(Debug, Error)]
pub enum SubtitleParseError {
    #[error("Malformed time line: {0:?}")]
    BadTimeLine(String),

    #[error("Invalid timestamp in time line: {0:?}")]
    BadTimestamp(String),
}

/// Serialize cues to the interchange format.
pub fn write_cues(cues: &[Cue]) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    for cue in cues {
        // Infallible on String
        let _ = write!(
            out,
            "{}\n{:.2} --> {:.2}\n{}\n\n",
            cue.index, cue.start, cue.end, cue.text
        );
    }
    out
}

/// Parse the interchange format into cues.
///
/// Blocks with fewer than 3 lines are silently skipped. Any extra lines
/// after the text line are ignored.
pub fn parse_cues(input: &str) -> Result<Vec<Cue>, SubtitleParseError> {
    let mut cues = Vec::new();

    for block in input.trim().split("\n\n") {
        let lines: Vec<&str> = block.trim().lines().collect();
        if lines.len() < 3 {
            continue;
        }

        let (start, end) = parse_time_line(lines[1])?;
        cues.push(Cue::new(cues.len() + 1, start, end, lines[2]));
    }

    Ok(cues)
}

/// Parse a `<start> --> <end>` line with times in raw seconds.
fn parse_time_line(line: &str) -> Result<(f64, f64), SubtitleParseError> {
    let (start, end) = line
        .split_once(" --> ")
        .ok_or_else(|| SubtitleParseError::BadTimeLine(line.to_string()))?;

    let parse = |s: &str| {
        s.trim()
            .parse::<f64>()
            .map_err(|_| SubtitleParseError::BadTimestamp(line.to_string()))
    };

    Ok((parse(start)?, parse(end)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cues() -> Vec<Cue> {
        vec![
            Cue::new(1, 0.0, 2.5, "Hello, world!"),
            Cue::new(2, 2.5, 5.0, "This is a test."),
            Cue::new(3, 6.125, 8.0, "Third cue"),
        ]
    }

    #[test]
    fn test_write_format() {
        let out = write_cues(&sample_cues());
        assert!(out.starts_with("1\n0.00 --> 2.50\nHello, world!\n\n"));
        assert!(out.contains("3\n6.12 --> 8.00\nThird cue\n\n"));
    }

    #[test]
    fn test_round_trip() {
        let cues = sample_cues();
        let parsed = parse_cues(&write_cues(&cues)).unwrap();

        assert_eq!(parsed.len(), cues.len());
        for (a, b) in parsed.iter().zip(&cues) {
            assert_eq!(a.index, b.index);
            assert!((a.start - b.start).abs() < 0.005);
            assert!((a.end - b.end).abs() < 0.005);
            assert_eq!(a.text, b.text);
        }
    }

    #[test]
    fn test_parse_skips_short_blocks() {
        let input = "1\n0.00 --> 1.00\nfirst\n\nnot-a-block\n\n2\n1.00 --> 2.00\nsecond\n";
        let cues = parse_cues(input).unwrap();
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].text, "first");
        assert_eq!(cues[1].text, "second");
    }

    #[test]
    fn test_parse_renumbers_in_file_order() {
        // Index lines are ignored; cues come back 1-based sequential.
        let input = "7\n0.00 --> 1.00\na\n\n9\n1.00 --> 2.00\nb\n";
        let cues = parse_cues(input).unwrap();
        assert_eq!(cues[0].index, 1);
        assert_eq!(cues[1].index, 2);
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_cues("").unwrap().is_empty());
        assert!(parse_cues("\n\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_bad_time_line_errors() {
        let input = "1\n0.00 -> 1.00\ntext\n";
        assert!(matches!(
            parse_cues(input),
            Err(SubtitleParseError::BadTimeLine(_))
        ));

        let input = "1\nabc --> 1.00\ntext\n";
        assert!(matches!(
            parse_cues(input),
            Err(SubtitleParseError::BadTimestamp(_))
        ));
    }

    #[test]
    fn test_parse_ignores_extra_lines() {
        let input = "1\n0.00 --> 1.00\nkept\ndropped\n";
        let cues = parse_cues(input).unwrap();
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "kept");
    }
}
