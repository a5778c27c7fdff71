//! Single-file pipeline: bytes or path → target-format PCM.
//!
//! # Pipeline flow
//!
//! ```text
//! path ──read──▶ bytes ──parse_wav──▶ WaveDescriptor
//!                       ──decode_to_mono──▶ f64 @ source rate
//!                       ──resample_linear──▶ f64 @ target rate
//!                       ──quantize_u8──▶ Vec<u8>
//! ```
//!
//! Any stage failure is returned as-is (wrapped with the file path by
//! [`Pipeline::process`]); no partial output ever escapes.

use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use crate::audio::{
    decode_to_mono, parse_wav, quantize_u8, resample_linear, DecodeError, TargetFormat,
};

// ---------------------------------------------------------------------------
// PipelineError
// ---------------------------------------------------------------------------

/// A per-file failure, tagged with the file it came from.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The file could not be read.
    #[error("{}: read failed: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not acceptable audio.
    #[error("{}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    /// The worker task processing the file panicked or was cancelled.
    #[error("{}: worker task failed: {message}", path.display())]
    Worker { path: PathBuf, message: String },
}

impl PipelineError {
    /// The file the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Decode { path, .. } | Self::Worker { path, .. } => {
                path
            }
        }
    }

    /// The decode failure, if this was not an I/O error.
    pub fn decode_error(&self) -> Option<&DecodeError> {
        match self {
            Self::Decode { source, .. } => Some(source),
            Self::Read { .. } | Self::Worker { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// decode_and_normalize
// ---------------------------------------------------------------------------

/// Convert a complete WAV file held in memory to raw PCM in `target`
/// format (no container header).
///
/// # Example
///
/// ```rust
/// use digit_sounds::audio::{DecodeError, FormatError, TargetFormat};
/// use digit_sounds::pipeline::decode_and_normalize;
///
/// let err = decode_and_normalize(b"RIFX....WAVE", &TargetFormat::CAPTCHA).unwrap_err();
/// assert!(matches!(err, DecodeError::Format(FormatError::NotRiffWave { .. })));
/// ```
pub fn decode_and_normalize(bytes: &[u8], target: &TargetFormat) -> Result<Vec<u8>, DecodeError> {
    let wave = parse_wav(bytes)?;
    debug!(
        "wav: {} Hz, {} ch, {} bit, {} data bytes",
        wave.sample_rate,
        wave.channel_count,
        wave.bits_per_sample,
        wave.sample_data.len()
    );

    let signal = decode_to_mono(&wave)?;
    let resampled = resample_linear(&signal.samples, signal.sample_rate, target.sample_rate());
    Ok(quantize_u8(&resampled))
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Owns the [`TargetFormat`] and runs the decode pipeline on files.
///
/// Stateless between calls and `Copy`, so one value can be handed to any
/// number of worker threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pipeline {
    target: TargetFormat,
}

impl Pipeline {
    pub fn new(target: TargetFormat) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &TargetFormat {
        &self.target
    }

    /// Run the pipeline on bytes already in memory.
    pub fn normalize(&self, bytes: &[u8]) -> Result<Vec<u8>, DecodeError> {
        decode_and_normalize(bytes, &self.target)
    }

    /// Read `path` fully and run the pipeline on its contents.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::Read`]: the file could not be read.
    /// - [`PipelineError::Decode`]: any [`DecodeError`] from the stages.
    pub fn process(&self, path: impl AsRef<Path>) -> Result<Vec<u8>, PipelineError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| PipelineError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.normalize(&bytes).map_err(|source| PipelineError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
