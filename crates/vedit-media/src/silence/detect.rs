//! Speech-span detection over raw samples.
//!
//! Pure sample math, no FFmpeg involved, so it is testable on synthetic
//! buffers. The threshold is relative to the track's own mean loudness,
//! which makes detection independent of absolute recording level. A track
//! with no energy at all (digital silence) yields zero spans.

use vedit_models::SpeechSpan;

use super::config::SilenceConfig;

/// Mean loudness of `samples` in dBFS.
///
/// Full scale is `1.0` for f32 PCM; returns `f64::NEG_INFINITY` for empty
/// or all-zero input.
pub fn mean_dbfs(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return f64::NEG_INFINITY;
    }

    let sum_sq: f64 = samples.iter().map(|s| *s as f64 * *s as f64).sum();
    let rms = (sum_sq / samples.len() as f64).sqrt();

    if rms <= 0.0 {
        f64::NEG_INFINITY
    } else {
        20.0 * rms.log10()
    }
}

/// Detect speech spans in a mono waveform.
///
/// Frames whose loudness falls below `mean - margin_db` are silent; runs of
/// silent frames of at least `min_silence_ms` split the timeline, shorter
/// runs are absorbed into the surrounding span. Returns spans in order;
/// empty when the track carries no detectable speech.
pub fn detect_speech_spans(
    samples: &[f32],
    sample_rate: usize,
    config: &SilenceConfig,
) -> Vec<SpeechSpan> {
    if samples.is_empty() || sample_rate == 0 {
        return Vec::new();
    }

    let mean = mean_dbfs(samples);
    if mean == f64::NEG_INFINITY {
        // Digital silence end to end
        return Vec::new();
    }
    let threshold = mean - config.margin_db;

    let frame_len = ((sample_rate as u64 * config.frame_ms / 1000) as usize).max(1);
    let silent: Vec<bool> = samples
        .chunks(frame_len)
        .map(|frame| mean_dbfs(frame) < threshold)
        .collect();

    let min_frames = ((config.min_silence_ms / config.frame_ms.max(1)) as usize).max(1);
    let n = silent.len();

    // Mark frames belonging to silence runs long enough to cut
    let mut cut = vec![false; n];
    let mut i = 0;
    while i < n {
        if silent[i] {
            let mut j = i;
            while j < n && silent[j] {
                j += 1;
            }
            if j - i >= min_frames {
                for flag in &mut cut[i..j] {
                    *flag = true;
                }
            }
            i = j;
        } else {
            i += 1;
        }
    }

    // Group the remaining frames into spans
    let total_secs = samples.len() as f64 / sample_rate as f64;
    let frame_secs = config.frame_ms as f64 / 1000.0;

    let mut spans = Vec::new();
    let mut i = 0;
    while i < n {
        if cut[i] {
            i += 1;
            continue;
        }

        let mut j = i;
        while j < n && !cut[j] {
            j += 1;
        }

        let start = i as f64 * frame_secs;
        let end = if j == n {
            total_secs
        } else {
            j as f64 * frame_secs
        };
        if end > start {
            spans.push(SpeechSpan::new(start, end));
        }
        i = j;
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: usize = 1000;

    fn tone(secs: f64, amplitude: f32) -> Vec<f32> {
        vec![amplitude; (secs * RATE as f64) as usize]
    }

    fn silence(secs: f64) -> Vec<f32> {
        tone(secs, 0.0)
    }

    #[test]
    fn test_mean_dbfs() {
        assert_eq!(mean_dbfs(&[]), f64::NEG_INFINITY);
        assert_eq!(mean_dbfs(&[0.0, 0.0]), f64::NEG_INFINITY);
        // Full-scale constant signal is 0 dBFS
        assert!(mean_dbfs(&[1.0, 1.0, 1.0]).abs() < 0.001);
        // Half scale is about -6 dBFS
        assert!((mean_dbfs(&[0.5, -0.5, 0.5]) + 6.02).abs() < 0.1);
    }

    #[test]
    fn test_known_boundaries() {
        // [0-2s silent, 2-5s tone, 5-6s silent, 6-8s tone]
        let mut samples = silence(2.0);
        samples.extend(tone(3.0, 0.5));
        samples.extend(silence(1.0));
        samples.extend(tone(2.0, 0.5));

        let spans = detect_speech_spans(&samples, RATE, &SilenceConfig::default());

        assert_eq!(spans.len(), 2);
        assert!((spans[0].start - 2.0).abs() < 0.05);
        assert!((spans[0].end - 5.0).abs() < 0.05);
        assert!((spans[1].start - 6.0).abs() < 0.05);
        assert!((spans[1].end - 8.0).abs() < 0.05);

        let kept: f64 = spans.iter().map(|s| s.duration()).sum();
        assert!((kept - 5.0).abs() < 0.1);
    }

    #[test]
    fn test_all_silent_yields_no_spans() {
        let samples = silence(4.0);
        let spans = detect_speech_spans(&samples, RATE, &SilenceConfig::default());
        assert!(spans.is_empty());
    }

    #[test]
    fn test_no_silence_yields_single_full_span() {
        let samples = tone(3.0, 0.3);
        let spans = detect_speech_spans(&samples, RATE, &SilenceConfig::default());

        assert_eq!(spans.len(), 1);
        assert!((spans[0].start - 0.0).abs() < f64::EPSILON);
        assert!((spans[0].end - 3.0).abs() < 0.001);
    }

    #[test]
    fn test_short_silence_absorbed() {
        // 300 ms silence is below the 500 ms minimum: one continuous span
        let mut samples = tone(1.0, 0.5);
        samples.extend(silence(0.3));
        samples.extend(tone(1.0, 0.5));

        let spans = detect_speech_spans(&samples, RATE, &SilenceConfig::default());

        assert_eq!(spans.len(), 1);
        assert!((spans[0].start - 0.0).abs() < f64::EPSILON);
        assert!((spans[0].end - 2.3).abs() < 0.001);
    }

    #[test]
    fn test_trailing_silence_cut() {
        let mut samples = tone(2.0, 0.5);
        samples.extend(silence(2.0));

        let spans = detect_speech_spans(&samples, RATE, &SilenceConfig::default());

        assert_eq!(spans.len(), 1);
        assert!((spans[0].end - 2.0).abs() < 0.05);
    }

    #[test]
    fn test_empty_input() {
        assert!(detect_speech_spans(&[], RATE, &SilenceConfig::default()).is_empty());
    }
}
