//! Audio extraction to raw PCM.
//!
//! Every extraction goes to a per-request-unique temp file that is deleted
//! when the [`AudioExtract`] guard drops, on success and failure alike.
//! The pipeline must never leave orphaned waveform files behind.

use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Sample rate used for all extracted waveforms (16 kHz mono).
pub const AUDIO_SAMPLE_RATE: usize = 16_000;

/// A temporary mono waveform extracted from a video.
///
/// The backing file is removed when this value is dropped.
pub struct AudioExtract {
    file: NamedTempFile,
}

impl AudioExtract {
    /// Path of the extracted waveform file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Load the waveform as f32 samples.
    pub async fn samples(&self) -> MediaResult<Vec<f32>> {
        load_samples(self.path()).await
    }
}

/// Extract the full audio track of `input` to 16 kHz mono f32le PCM.
///
/// Returns [`MediaError::NoAudioData`] when the input has no audio track
/// (FFmpeg succeeds but writes an empty file).
pub async fn extract_audio(input: impl AsRef<Path>) -> MediaResult<AudioExtract> {
    let input = input.as_ref();

    let file = NamedTempFile::new()?;

    debug!(
        input = %input.display(),
        output = %file.path().display(),
        "Extracting audio track"
    );

    let cmd = FfmpegCommand::new(input, file.path())
        .no_video()
        .output_args(["-ar", &AUDIO_SAMPLE_RATE.to_string()])
        .output_args(["-ac", "1"])
        .output_args(["-f", "f32le"]);

    FfmpegRunner::new().run(&cmd).await?;

    let metadata = tokio::fs::metadata(file.path()).await?;
    if metadata.len() == 0 {
        return Err(MediaError::NoAudioData);
    }

    debug!(output_size = metadata.len(), "Audio extraction complete");

    Ok(AudioExtract { file })
}

/// Load raw f32le audio samples from a file.
pub async fn load_samples(path: &Path) -> MediaResult<Vec<f32>> {
    let bytes = tokio::fs::read(path).await?;

    // 4 bytes per sample, little-endian
    let samples: Vec<f32> = bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_samples_empty_file() {
        let temp = NamedTempFile::new().unwrap();
        let samples = load_samples(temp.path()).await.unwrap();
        assert!(samples.is_empty());
    }

    #[tokio::test]
    async fn test_load_samples_with_data() {
        let temp = NamedTempFile::new().unwrap();

        let test_samples: Vec<f32> = vec![0.0, 0.5, 1.0, -1.0];
        let bytes: Vec<u8> = test_samples.iter().flat_map(|f| f.to_le_bytes()).collect();

        tokio::fs::write(temp.path(), &bytes).await.unwrap();

        let loaded = load_samples(temp.path()).await.unwrap();
        assert_eq!(loaded.len(), 4);
        assert!((loaded[0] - 0.0).abs() < 0.001);
        assert!((loaded[1] - 0.5).abs() < 0.001);
        assert!((loaded[2] - 1.0).abs() < 0.001);
        assert!((loaded[3] - (-1.0)).abs() < 0.001);
    }
}
