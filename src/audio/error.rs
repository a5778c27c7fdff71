//! Errors raised while turning a WAV byte stream into target-format PCM.
//!
//! Every variant is terminal for the file being processed: malformed input
//! cannot become valid by retrying, so the pipeline surfaces the first error
//! and never returns partial output.

use thiserror::Error;

// ---------------------------------------------------------------------------
// FormatError
// ---------------------------------------------------------------------------

/// Structural problems in the RIFF/WAVE container itself.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Bytes 0–3 are not `"RIFF"` or bytes 8–11 are not `"WAVE"`.
    #[error("not RIFF/WAVE (riff id {riff:?}, form type {wave:?})")]
    NotRiffWave { riff: String, wave: String },

    /// The `"fmt "` chunk is shorter than the 16 bytes PCM requires.
    #[error("fmt chunk too small: {len} bytes (need at least 16)")]
    FmtChunkTooSmall { len: u32 },

    /// A chunk header or payload runs past the end of the stream.
    #[error(
        "truncated stream: chunk {chunk:?} at offset {offset} needs {needed} bytes, \
         {available} available"
    )]
    Truncated {
        chunk: String,
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// The stream ended before a `"data"` chunk was found.
    #[error("no data chunk")]
    NoDataChunk,

    /// A `"data"` chunk was found but no `"fmt "` chunk describes it.
    #[error("no fmt chunk")]
    NoFmtChunk,
}

// ---------------------------------------------------------------------------
// DecodeError
// ---------------------------------------------------------------------------

/// Any reason a WAV file could not be normalized to the target format.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Malformed RIFF/WAVE structure.
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// Audio format code other than 1 (linear PCM).
    #[error("unsupported format: audio format code {code} (expected 1 = PCM)")]
    UnsupportedAudioFormat { code: u16 },

    /// Bit depth other than 8 or 16.
    #[error("unsupported format: {bits} bits per sample (expected 8 or 16)")]
    UnsupportedBitDepth { bits: u16 },

    /// A `"fmt "` chunk declaring a sample rate of zero.
    #[error("unsupported format: sample rate {rate} Hz (must be non-zero)")]
    UnsupportedSampleRate { rate: u32 },

    /// Channel count outside `{1, 2}`.
    #[error("unsupported channel count: {channels} (expected 1 or 2)")]
    UnsupportedChannels { channels: u16 },

    /// Payload length is not a whole number of sample frames.
    #[error(
        "corrupt data: {len} payload bytes is not a multiple of the \
         {frame_bytes}-byte frame ({channels} ch, {bits} bit)"
    )]
    CorruptData {
        len: usize,
        frame_bytes: usize,
        channels: u16,
        bits: u16,
    },
}

impl DecodeError {
    /// `true` for the "unsupported format" cases (non-PCM code, bit depth or
    /// sample rate), which callers usually report together.
    pub fn is_unsupported_format(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedAudioFormat { .. }
                | Self::UnsupportedBitDepth { .. }
                | Self::UnsupportedSampleRate { .. }
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
