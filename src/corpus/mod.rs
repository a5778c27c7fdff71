//! Recording corpus layout.
//!
//! ```text
//! <in>/
//! ├── beep.wav          (optional)
//! ├── en/0.wav .. 9.wav
//! ├── es/0.wav .. 9.wav
//! └── …
//! ```

pub mod discover;

pub use discover::{
    build_jobs, digit_path, discover_languages, has_all_digit_files, parse_language_list,
    resolve_languages, CorpusError, SoundId, DIGIT_COUNT,
};
