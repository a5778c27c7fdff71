//! Rendering of the generated Rust source file.
//!
//! Output layout:
//!
//! ```text
//! // @generated by digit-sounds from .wav files. DO NOT EDIT.
//!
//! pub static WAVE_HEADER: [u8; 40] = [ … ];
//!
//! pub static DIGIT_SOUNDS: &[(&str, [&[u8]; 10])] = &[
//!     ("en", [
//!         &[ // 0
//!             0x80, 0x81, …
//!         ],
//!         …
//!     ]),
//! ];
//!
//! pub static BEEP_SOUND: &[u8] = &[ … ];   (only with a beep)
//! ```

use crate::audio::TargetFormat;

/// Normalized samples for one language, digits `0..=9` in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSounds {
    pub lang: String,
    pub digits: [Vec<u8>; 10],
}

/// Everything that goes into the generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundTable {
    pub target: TargetFormat,
    /// Sorted by language code.
    pub languages: Vec<LanguageSounds>,
    pub beep: Option<Vec<u8>>,
}

/// Line layout of the byte arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLayout {
    pub bytes_per_line: usize,
    pub digit_bytes_per_line: usize,
}

impl Default for SourceLayout {
    fn default() -> Self {
        Self {
            bytes_per_line: 12,
            digit_bytes_per_line: 11,
        }
    }
}

/// Format `bytes` as `0x..` literals, `per_line` to a line, each line
/// indented by `indent` and every element followed by a comma.
pub fn format_bytes(bytes: &[u8], per_line: usize, indent: &str) -> String {
    let per_line = per_line.max(1);
    let mut out = String::with_capacity(bytes.len() * 6 + indent.len() * (bytes.len() / per_line + 1));
    for line in bytes.chunks(per_line) {
        out.push_str(indent);
        let items: Vec<String> = line.iter().map(|b| format!("{b:#04x},")).collect();
        out.push_str(&items.join(" "));
        out.push('\n');
    }
    out
}

/// Render `table` as a Rust source file.
pub fn render_source(table: &SoundTable, layout: SourceLayout) -> String {
    let target = &table.target;
    let mut out = String::new();

    out.push_str("// @generated by digit-sounds from .wav files. DO NOT EDIT.\n\n");

    let header = target.wave_header();
    out.push_str(&format!(
        "/// RIFF/WAVE header for mono {} Hz {}-bit PCM with both size fields zeroed.\n",
        target.sample_rate(),
        target.bits_per_sample()
    ));
    out.push_str(&format!("pub static WAVE_HEADER: [u8; {}] = [\n", header.len()));
    out.push_str(&format_bytes(&header, layout.bytes_per_line, "    "));
    out.push_str("];\n\n");

    out.push_str(&format!(
        "/// Raw {} Hz unsigned {}-bit PCM per language, digits 0..=9 (no WAV header).\n",
        target.sample_rate(),
        target.bits_per_sample()
    ));
    out.push_str("pub static DIGIT_SOUNDS: &[(&str, [&[u8]; 10])] = &[\n");
    for lang in &table.languages {
        out.push_str(&format!("    ({:?}, [\n", lang.lang));
        for (digit, samples) in lang.digits.iter().enumerate() {
            out.push_str(&format!("        &[ // {digit}\n"));
            out.push_str(&format_bytes(samples, layout.digit_bytes_per_line, "            "));
            out.push_str("        ],\n");
        }
        out.push_str("    ]),\n");
    }
    out.push_str("];\n");

    if let Some(beep) = &table.beep {
        out.push('\n');
        out.push_str(&format!(
            "/// Raw {} Hz unsigned {}-bit PCM beep cue (no WAV header).\n",
            target.sample_rate(),
            target.bits_per_sample()
        ));
        out.push_str("pub static BEEP_SOUND: &[u8] = &[\n");
        out.push_str(&format_bytes(beep, layout.bytes_per_line, "    "));
        out.push_str("];\n");
    }

    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
