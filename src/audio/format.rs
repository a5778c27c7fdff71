//! The fixed output format every input file is normalized toward.

/// Length of the header template produced by [`TargetFormat::wave_header`]:
/// the 12-byte RIFF preamble, the 24-byte `"fmt "` chunk and the 4-byte
/// `"data"` id (the data length is left for the consumer to append).
pub const WAVE_HEADER_LEN: usize = 40;

/// Output sample layout: rate, channel count and bit depth.
///
/// Not configurable at runtime; the only value is [`TargetFormat::CAPTCHA`]
/// (mono 8 kHz unsigned 8-bit), which is also the `Default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetFormat {
    sample_rate: u32,
    channels: u16,
    bits_per_sample: u16,
}

impl TargetFormat {
    /// Mono, 8 000 Hz, unsigned 8-bit PCM.
    pub const CAPTCHA: Self = Self {
        sample_rate: 8_000,
        channels: 1,
        bits_per_sample: 8,
    };

    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub const fn channels(&self) -> u16 {
        self.channels
    }

    pub const fn bits_per_sample(&self) -> u16 {
        self.bits_per_sample
    }

    /// Bytes per sample frame (`channels * bits / 8`).
    pub const fn block_align(&self) -> u16 {
        self.channels * self.bits_per_sample / 8
    }

    /// Bytes per second of audio.
    pub const fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }

    /// RIFF/WAVE header template for this format with both size fields set
    /// to zero, ending right after the `"data"` chunk id.
    pub fn wave_header(&self) -> [u8; WAVE_HEADER_LEN] {
        let mut header = [0u8; WAVE_HEADER_LEN];
        header[0..4].copy_from_slice(b"RIFF");
        // 4..8: RIFF size, zeroed
        header[8..12].copy_from_slice(b"WAVE");
        header[12..16].copy_from_slice(b"fmt ");
        header[16..20].copy_from_slice(&16u32.to_le_bytes());
        header[20..22].copy_from_slice(&1u16.to_le_bytes()); // PCM
        header[22..24].copy_from_slice(&self.channels.to_le_bytes());
        header[24..28].copy_from_slice(&self.sample_rate.to_le_bytes());
        header[28..32].copy_from_slice(&self.byte_rate().to_le_bytes());
        header[32..34].copy_from_slice(&self.block_align().to_le_bytes());
        header[34..36].copy_from_slice(&self.bits_per_sample.to_le_bytes());
        header[36..40].copy_from_slice(b"data");
        header
    }
}

impl Default for TargetFormat {
    fn default() -> Self {
        Self::CAPTCHA
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
