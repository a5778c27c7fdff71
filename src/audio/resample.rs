//! Channel mixing and sample-rate conversion.
//!
//! 1. [`stereo_to_mono`]: downmix interleaved frames to mono.
//! 2. [`resample_linear`]: convert between sample rates by linear
//!    interpolation.
//!
//! ## Aliasing
//!
//! No low-pass filter runs before decimation, so content above the target
//! Nyquist frequency (4 kHz at 8 kHz output) folds back into the band.
//! Spoken digits tolerate this and the output must stay bit-reproducible.

// ---------------------------------------------------------------------------
// stereo_to_mono
// ---------------------------------------------------------------------------

/// Mix interleaved mono or stereo audio down to mono.
///
/// * `channels == 1` copies the input unchanged.
/// * `channels == 2` uses `0.5 * (l + r)` per frame; a trailing half frame
///   is ignored (the decoder rejects those before calling this).
/// * Any other count returns an empty vector; the decoder reports those as
///   unsupported first.
///
/// # Example
///
/// ```rust
/// use digit_sounds::audio::stereo_to_mono;
///
/// let stereo = vec![0.5_f64, -0.5, 0.2, 0.4]; // L R L R
/// let mono = stereo_to_mono(&stereo, 2);
/// assert_eq!(mono.len(), 2);
/// assert!((mono[0] - 0.0).abs() < 1e-12);
/// assert!((mono[1] - 0.3).abs() < 1e-12);
/// ```
pub fn stereo_to_mono(samples: &[f64], channels: u16) -> Vec<f64> {
    match channels {
        1 => samples.to_vec(),
        2 => samples
            .chunks_exact(2)
            .map(|frame| 0.5 * (frame[0] + frame[1]))
            .collect(),
        _ => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// resample_linear
// ---------------------------------------------------------------------------

/// Number of output samples for `input_len` samples converted
/// `sr_from` → `sr_to`: the input duration times the target rate, rounded
/// to the nearest integer. A zero rate on either side yields 0.
pub fn resampled_len(input_len: usize, sr_from: u32, sr_to: u32) -> usize {
    if sr_from == 0 || sr_to == 0 {
        return 0;
    }
    let duration = input_len as f64 / sr_from as f64;
    let n = (duration * sr_to as f64).round();
    if n <= 0.0 {
        0
    } else {
        n as usize
    }
}

/// Resample `x` from `sr_from` Hz to `sr_to` Hz using linear interpolation.
///
/// * Equal rates or an empty input return a copy of `x` (no interpolation
///   error introduced).
/// * A zero rate on either side (with the other non-zero) returns nothing.
/// * Output sample `i` sits at source position `i * sr_from / sr_to` and
///   blends its two neighbours; positions at or past the last input sample
///   hold that sample (no extrapolation).
///
/// # Example
///
/// ```rust
/// use digit_sounds::audio::resample_linear;
///
/// // Same rate: identity
/// let x = vec![0.1_f64, 0.2, 0.3];
/// assert_eq!(resample_linear(&x, 8_000, 8_000), x);
///
/// // 16 kHz → 8 kHz halves the length
/// let hi = vec![0.5_f64; 160];
/// assert_eq!(resample_linear(&hi, 16_000, 8_000).len(), 80);
/// ```
pub fn resample_linear(x: &[f64], sr_from: u32, sr_to: u32) -> Vec<f64> {
    if sr_from == sr_to || x.is_empty() {
        return x.to_vec();
    }

    let output_len = resampled_len(x.len(), sr_from, sr_to);
    if output_len == 0 {
        return Vec::new();
    }
    let ratio = sr_from as f64 / sr_to as f64;
    let last = x.len() - 1;

    (0..output_len)
        .map(|i| {
            let pos = i as f64 * ratio;
            let idx = pos.floor() as usize;
            if idx >= last {
                return x[last];
            }
            let frac = pos - idx as f64;
            x[idx] * (1.0 - frac) + x[idx + 1] * frac
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
