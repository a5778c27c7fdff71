//! PCM sample decoding and channel mixdown.
//!
//! Turns the raw `"data"` bytes of a [`WaveDescriptor`] into a mono `f64`
//! signal in `[-1.0, 1.0]`:
//!
//! | Input            | Amplitude               |
//! |------------------|-------------------------|
//! | 8-bit unsigned   | `v / 255 * 2 - 1`       |
//! | 16-bit signed LE | `v / 32768`             |
//!
//! Stereo frames are averaged (`0.5 * (l + r)`) into one mono sample.

use super::error::DecodeError;
use super::resample::stereo_to_mono;
use super::wav::WaveDescriptor;

/// A mono signal paired with the rate it was sampled at.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedSignal {
    pub samples: Vec<f64>,
    pub sample_rate: u32,
}

/// Amplitude of one unsigned 8-bit sample.
#[inline]
pub fn u8_to_amplitude(v: u8) -> f64 {
    (v as f64 / 255.0) * 2.0 - 1.0
}

/// Amplitude of one signed 16-bit sample.
#[inline]
pub fn i16_to_amplitude(v: i16) -> f64 {
    v as f64 / 32768.0
}

/// Decode `wave` to a mono signal at its original sample rate.
///
/// # Errors
///
/// - [`DecodeError::UnsupportedChannels`]: channel count is not 1 or 2.
/// - [`DecodeError::UnsupportedBitDepth`]: bits per sample not 8 or 16
///   (only reachable for descriptors built by hand).
/// - [`DecodeError::CorruptData`]: payload is not a whole number of frames.
pub fn decode_to_mono(wave: &WaveDescriptor) -> Result<DecodedSignal, DecodeError> {
    let channels = wave.channel_count;
    if channels != 1 && channels != 2 {
        return Err(DecodeError::UnsupportedChannels { channels });
    }

    let bytes_per_sample = match wave.bits_per_sample {
        8 => 1,
        16 => 2,
        bits => return Err(DecodeError::UnsupportedBitDepth { bits }),
    };

    let frame_bytes = bytes_per_sample * channels as usize;
    let data = &wave.sample_data;
    if data.len() % frame_bytes != 0 {
        return Err(DecodeError::CorruptData {
            len: data.len(),
            frame_bytes,
            channels,
            bits: wave.bits_per_sample,
        });
    }

    let interleaved: Vec<f64> = match bytes_per_sample {
        1 => data.iter().map(|&v| u8_to_amplitude(v)).collect(),
        _ => data
            .chunks_exact(2)
            .map(|b| i16_to_amplitude(i16::from_le_bytes([b[0], b[1]])))
            .collect(),
    };

    Ok(DecodedSignal {
        samples: stereo_to_mono(&interleaved, channels),
        sample_rate: wave.sample_rate,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn wave(channels: u16, bits: u16, data: Vec<u8>) -> WaveDescriptor {
        WaveDescriptor {
            sample_rate: 8_000,
            channel_count: channels,
            bits_per_sample: bits,
            audio_format_code: 1,
            sample_data: data,
        }
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{actual:?} vs {expected:?}");
        }
    }

    #[test]
    fn eight_bit_mono_maps_full_scale() {
        let out = decode_to_mono(&wave(1, 8, vec![0, 128, 255])).unwrap();
        assert_eq!(out.sample_rate, 8_000);
        assert_close(&out.samples, &[-1.0, 128.0 / 255.0 * 2.0 - 1.0, 1.0]);
        assert!((out.samples[1] - 0.003_921_568).abs() < 1e-6);
    }

    #[test]
    fn sixteen_bit_mono_scales_by_32768() {
        let data = [16_384i16, -16_384, i16::MIN, i16::MAX]
            .iter()
            .flat_map(|s| s.to_le_bytes())
            .collect();
        let out = decode_to_mono(&wave(1, 16, data)).unwrap();
        assert_close(&out.samples, &[0.5, -0.5, -1.0, 32_767.0 / 32_768.0]);
    }

    #[test]
    fn stereo_frames_are_averaged() {
        let data = [32_767i16, -32_768, 8_192, 8_192]
            .iter()
            .flat_map(|s| s.to_le_bytes())
            .collect();
        let out = decode_to_mono(&wave(2, 16, data)).unwrap();
        assert_close(&out.samples, &[0.5 * (32_767.0 - 32_768.0) / 32_768.0, 0.25]);
    }

    #[test]
    fn identical_channels_mix_to_either_channel() {
        let mono: Vec<u8> = vec![0, 17, 128, 200, 255];
        let stereo: Vec<u8> = mono.iter().flat_map(|&v| [v, v]).collect();
        let from_mono = decode_to_mono(&wave(1, 8, mono)).unwrap();
        let from_stereo = decode_to_mono(&wave(2, 8, stereo)).unwrap();
        assert_eq!(from_mono.samples, from_stereo.samples);
    }

    #[test]
    fn empty_payload_decodes_to_empty_signal() {
        let out = decode_to_mono(&wave(2, 16, Vec::new())).unwrap();
        assert!(out.samples.is_empty());
    }

    #[test]
    fn rejects_other_channel_counts() {
        for channels in [0, 3, 6] {
            assert_eq!(
                decode_to_mono(&wave(channels, 16, vec![0; 12])).unwrap_err(),
                DecodeError::UnsupportedChannels { channels }
            );
        }
    }

    #[test]
    fn rejects_partial_16_bit_frame() {
        let err = decode_to_mono(&wave(2, 16, vec![0; 6])).unwrap_err();
        assert_eq!(
            err,
            DecodeError::CorruptData {
                len: 6,
                frame_bytes: 4,
                channels: 2,
                bits: 16
            }
        );
    }

    #[test]
    fn rejects_odd_16_bit_mono_payload() {
        assert!(matches!(
            decode_to_mono(&wave(1, 16, vec![0; 3])).unwrap_err(),
            DecodeError::CorruptData { frame_bytes: 2, .. }
        ));
    }

    #[test]
    fn rejects_partial_8_bit_stereo_frame() {
        assert!(matches!(
            decode_to_mono(&wave(2, 8, vec![0; 5])).unwrap_err(),
            DecodeError::CorruptData { frame_bytes: 2, .. }
        ));
    }
}
