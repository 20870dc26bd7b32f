//! Shared data models for the vedit backend.
//!
//! This crate provides Serde-serializable types for:
//! - Subtitle cues and speech spans
//! - The subtitle interchange format (writer + parser)
//! - Style templates and the fixed template catalog
//! - Encoding configuration

pub mod cue;
pub mod encoding;
pub mod style;
pub mod subtitle;

// Re-export common types
pub use cue::{Cue, SpeechSpan};
pub use encoding::EncodingConfig;
pub use style::{StyleTemplate, TemplateCatalog, VerticalAnchor, DEFAULT_TEMPLATE};
pub use subtitle::{parse_cues, write_cues, SubtitleParseError};
