//! Audio normalization: WAV bytes → mono 8 kHz unsigned 8-bit PCM.
//!
//! # Pipeline
//!
//! ```text
//! bytes → parse_wav → WaveDescriptor → decode_to_mono → DecodedSignal (f64)
//!       → resample_linear → quantize_u8 → Vec<u8>
//! ```
//!
//! Every stage is a pure function of its input and allocates a new value,
//! so files can be processed on any number of threads at once.
//!
//! # Quick Start
//!
//! ```rust
//! use digit_sounds::audio::{decode_to_mono, parse_wav, quantize_u8, resample_linear};
//!
//! # fn wav() -> Vec<u8> {
//! #     let mut w = b"RIFF\0\0\0\0WAVEfmt \x10\0\0\0\x01\0\x01\0\x40\x1f\0\0\x40\x1f\0\0\x01\0\x08\0".to_vec();
//! #     w.extend_from_slice(b"data\x03\0\0\0\x00\x80\xff\0");
//! #     w
//! # }
//! let wave = parse_wav(&wav()).unwrap();
//! let signal = decode_to_mono(&wave).unwrap();
//! let resampled = resample_linear(&signal.samples, signal.sample_rate, 8_000);
//! assert_eq!(quantize_u8(&resampled), vec![0, 128, 255]);
//! ```

pub mod decode;
pub mod error;
pub mod format;
pub mod quantize;
pub mod resample;
pub mod wav;

pub use decode::{decode_to_mono, DecodedSignal};
pub use error::{DecodeError, FormatError};
pub use format::{TargetFormat, WAVE_HEADER_LEN};
pub use quantize::{amplitude_to_u8, quantize_u8};
pub use resample::{resample_linear, resampled_len, stereo_to_mono};
pub use wav::{parse_wav, ByteCursor, WaveDescriptor};
