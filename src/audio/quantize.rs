//! Float → unsigned 8-bit PCM quantization.

/// Map one amplitude to an unsigned 8-bit sample.
///
/// `v` is clamped to `[-1.0, 1.0]` and mapped with
/// `round((v + 1) * 0.5 * 255)`, rounding halves away from zero. NaN maps
/// to mid-scale.
#[inline]
pub fn amplitude_to_u8(v: f64) -> u8 {
    if v.is_nan() {
        return 128;
    }
    let v = v.clamp(-1.0, 1.0);
    ((v + 1.0) * 0.5 * 255.0).round() as u8
}

/// Quantize a signal to unsigned 8-bit PCM. The output has the same length
/// as `x`.
///
/// ```rust
/// use digit_sounds::audio::quantize_u8;
///
/// assert_eq!(quantize_u8(&[-1.0, 0.0, 1.0, 7.5]), vec![0, 128, 255, 255]);
/// ```
pub fn quantize_u8(x: &[f64]) -> Vec<u8> {
    x.iter().map(|&v| amplitude_to_u8(v)).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
