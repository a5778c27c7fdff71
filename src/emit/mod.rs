//! Generated-source output for the normalized sound tables.

pub mod source;

pub use source::{format_bytes, render_source, LanguageSounds, SoundTable, SourceLayout};
