//! Configuration for silence detection.

use serde::{Deserialize, Serialize};

/// Configuration for energy-based silence detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SilenceConfig {
    /// Margin below the track's mean loudness, in dB.
    ///
    /// The silence threshold is `mean_dbfs - margin_db`. Larger margins cut
    /// only very quiet passages; smaller margins cut more aggressively.
    pub margin_db: f64,

    /// Minimum silence duration before it splits a speech span (milliseconds).
    ///
    /// Silences shorter than this are treated as part of the surrounding
    /// speech span, not cut.
    pub min_silence_ms: u64,

    /// Analysis frame length (milliseconds).
    pub frame_ms: u64,
}

impl Default for SilenceConfig {
    fn default() -> Self {
        Self {
            margin_db: 30.0,
            min_silence_ms: 500,
            frame_ms: 10,
        }
    }
}

impl SilenceConfig {
    /// Builder-style setter for the loudness margin.
    pub fn with_margin_db(mut self, margin: f64) -> Self {
        self.margin_db = margin;
        self
    }

    /// Builder-style setter for the minimum silence duration.
    pub fn with_min_silence_ms(mut self, ms: u64) -> Self {
        self.min_silence_ms = ms;
        self
    }
}
