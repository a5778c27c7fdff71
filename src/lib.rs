//! Spoken-digit sound table generator.
//!
//! Decodes per-language digit recordings (`0.wav`..`9.wav`) and an optional
//! beep cue into raw mono 8 kHz unsigned 8-bit PCM, then emits the bytes as
//! a Rust source file for embedding.
//!
//! - [`audio`]: RIFF/WAVE parsing, mixdown, resampling, quantization.
//! - [`pipeline`]: single-file and batch orchestration.
//! - [`corpus`]: language folder discovery.
//! - [`emit`]: generated source rendering.
//! - [`config`]: `settings.toml` persistence.

pub mod audio;
pub mod config;
pub mod corpus;
pub mod emit;
pub mod pipeline;
