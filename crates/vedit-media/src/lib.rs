#![deny(unreachable_patterns)]
//! FFmpeg CLI wrapper for video processing.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building
//! - FFprobe metadata queries
//! - Audio extraction to raw PCM with scoped temp-file cleanup
//! - Energy-based silence detection over raw samples
//! - Speech-span cutting and concatenation
//! - Subtitle overlay compositing via drawtext

pub mod audio;
pub mod command;
pub mod error;
pub mod overlay;
pub mod probe;
pub mod silence;

pub use audio::{extract_audio, AudioExtract, AUDIO_SAMPLE_RATE};
pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
pub use overlay::overlay_cues;
pub use probe::{get_duration, probe_video, VideoInfo};
pub use silence::{concat_spans, detect_speech_spans, SilenceConfig};
