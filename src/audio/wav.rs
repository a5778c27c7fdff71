//! RIFF/WAVE container parsing.
//!
//! [`parse_wav`] walks the chunk list of an in-memory WAV file with a
//! [`ByteCursor`] and returns a [`WaveDescriptor`] holding the `"fmt "`
//! fields and the raw `"data"` payload.
//!
//! ```text
//! 0        4        8        12
//! ┌────────┬────────┬────────┬──────────────────────────────────┐
//! │ "RIFF" │ size   │ "WAVE" │ chunk, chunk, …                  │
//! └────────┴────────┴────────┴──────────────────────────────────┘
//!                             chunk = id[4] len[u32 LE] payload[len] (pad if odd)
//! ```
//!
//! Chunk order is free: unknown chunks (`LIST`, `fact`, `cue `, …) are
//! skipped and `"data"` may come before `"fmt "`.
//!
//! # Example
//!
//! ```rust
//! use digit_sounds::audio::{parse_wav, DecodeError, FormatError};
//!
//! let err = parse_wav(b"not a wav file").unwrap_err();
//! assert!(matches!(err, DecodeError::Format(FormatError::NotRiffWave { .. })));
//! ```

use log::debug;

use super::error::{DecodeError, FormatError};

/// Audio format code for linear PCM.
pub const WAVE_FORMAT_PCM: u16 = 1;

/// Minimum length of a PCM `"fmt "` chunk.
const FMT_CHUNK_MIN_LEN: u32 = 16;

// ---------------------------------------------------------------------------
// WaveDescriptor
// ---------------------------------------------------------------------------

/// Everything the decoder needs from a WAV file.
///
/// Only produced for linear PCM at 8 or 16 bits with a non-zero sample rate;
/// any other combination is rejected by [`parse_wav`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveDescriptor {
    pub sample_rate: u32,
    pub channel_count: u16,
    pub bits_per_sample: u16,
    pub audio_format_code: u16,
    /// Raw interleaved sample bytes, exactly as stored in the `"data"` chunk.
    pub sample_data: Vec<u8>,
}

// ---------------------------------------------------------------------------
// ByteCursor
// ---------------------------------------------------------------------------

/// Forward-only read position over a byte slice.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.remaining() == 0
    }

    /// Consume the next `n` bytes, or `None` (without moving) if fewer remain.
    pub fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        if n > self.remaining() {
            return None;
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Some(slice)
    }

    /// Consume exactly `N` bytes as an array.
    pub fn take_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        self.take(N).map(|s| {
            let mut out = [0u8; N];
            out.copy_from_slice(s);
            out
        })
    }

    /// Advance by up to `n` bytes, stopping at the end. Returns how many
    /// bytes were actually skipped.
    pub fn skip(&mut self, n: usize) -> usize {
        let step = n.min(self.remaining());
        self.pos += step;
        step
    }
}

// ---------------------------------------------------------------------------
// fmt chunk
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct FmtChunk {
    audio_format: u16,
    channels: u16,
    sample_rate: u32,
    bits_per_sample: u16,
}

impl FmtChunk {
    fn parse(payload: &[u8]) -> Result<Self, FormatError> {
        if payload.len() < FMT_CHUNK_MIN_LEN as usize {
            return Err(FormatError::FmtChunkTooSmall {
                len: payload.len() as u32,
            });
        }
        // byte rate (8..12) and block align (12..14) are derived values and
        // ignored; anything past 16 bytes is a format extension.
        Ok(Self {
            audio_format: u16::from_le_bytes([payload[0], payload[1]]),
            channels: u16::from_le_bytes([payload[2], payload[3]]),
            sample_rate: u32::from_le_bytes([payload[4], payload[5], payload[6], payload[7]]),
            bits_per_sample: u16::from_le_bytes([payload[14], payload[15]]),
        })
    }
}

// ---------------------------------------------------------------------------
// parse_wav
// ---------------------------------------------------------------------------

/// Parse a complete RIFF/WAVE file held in memory.
///
/// # Errors
///
/// - [`FormatError::NotRiffWave`]: bad outer header.
/// - [`FormatError::FmtChunkTooSmall`]: `"fmt "` shorter than 16 bytes.
/// - [`FormatError::Truncated`]: a chunk runs past the end of `bytes`.
/// - [`FormatError::NoDataChunk`] / [`FormatError::NoFmtChunk`].
/// - [`DecodeError::UnsupportedAudioFormat`]: format code is not PCM.
/// - [`DecodeError::UnsupportedBitDepth`]: bits per sample not 8 or 16.
/// - [`DecodeError::UnsupportedSampleRate`]: sample rate of zero.
pub fn parse_wav(bytes: &[u8]) -> Result<WaveDescriptor, DecodeError> {
    let mut cursor = ByteCursor::new(bytes);

    let header: [u8; 12] = cursor.take_array().ok_or_else(|| not_riff_wave(bytes))?;
    if &header[0..4] != b"RIFF" || &header[8..12] != b"WAVE" {
        return Err(not_riff_wave(bytes).into());
    }

    let mut fmt: Option<FmtChunk> = None;
    let mut data: Option<Vec<u8>> = None;

    while !(fmt.is_some() && data.is_some()) && !cursor.is_at_end() {
        let offset = cursor.position();
        let chunk_header: [u8; 8] =
            cursor.take_array().ok_or_else(|| FormatError::Truncated {
                chunk: "chunk header".into(),
                offset,
                needed: 8,
                available: cursor.remaining(),
            })?;

        let id = [chunk_header[0], chunk_header[1], chunk_header[2], chunk_header[3]];
        let len = u32::from_le_bytes([
            chunk_header[4],
            chunk_header[5],
            chunk_header[6],
            chunk_header[7],
        ]);

        let payload = cursor
            .take(len as usize)
            .ok_or_else(|| FormatError::Truncated {
                chunk: chunk_name(&id),
                offset,
                needed: len as usize,
                available: cursor.remaining(),
            })?;

        match &id {
            b"fmt " => fmt = Some(FmtChunk::parse(payload)?),
            b"data" => data = Some(payload.to_vec()),
            _ => debug!("skipping {:?} chunk ({len} bytes) at offset {offset}", chunk_name(&id)),
        }

        // Odd-sized chunks carry one pad byte; a writer that drops it on the
        // final chunk is tolerated.
        if len % 2 == 1 {
            cursor.skip(1);
        }
    }

    let sample_data = data.ok_or(FormatError::NoDataChunk)?;
    let fmt = fmt.ok_or(FormatError::NoFmtChunk)?;

    if fmt.audio_format != WAVE_FORMAT_PCM {
        return Err(DecodeError::UnsupportedAudioFormat {
            code: fmt.audio_format,
        });
    }
    if fmt.bits_per_sample != 8 && fmt.bits_per_sample != 16 {
        return Err(DecodeError::UnsupportedBitDepth {
            bits: fmt.bits_per_sample,
        });
    }
    if fmt.sample_rate == 0 {
        return Err(DecodeError::UnsupportedSampleRate {
            rate: fmt.sample_rate,
        });
    }

    Ok(WaveDescriptor {
        sample_rate: fmt.sample_rate,
        channel_count: fmt.channels,
        bits_per_sample: fmt.bits_per_sample,
        audio_format_code: fmt.audio_format,
        sample_data,
    })
}

fn chunk_name(id: &[u8; 4]) -> String {
    String::from_utf8_lossy(id).into_owned()
}

fn not_riff_wave(bytes: &[u8]) -> FormatError {
    let field = |range: std::ops::Range<usize>| {
        bytes
            .get(range)
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .unwrap_or_default()
    };
    FormatError::NotRiffWave {
        riff: field(0..4),
        wave: field(8..12),
    }
}

// ---------------------------------------------------------------------------
// Test fixtures
// ---------------------------------------------------------------------------


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
