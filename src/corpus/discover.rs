//! Language folder discovery and job list construction.

use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use crate::config::InputConfig;
use crate::pipeline::Job;

/// Number of digit recordings every language must provide.
pub const DIGIT_COUNT: u8 = 10;

// ---------------------------------------------------------------------------
// CorpusError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum CorpusError {
    /// Neither an explicit list nor auto-detection produced a language.
    #[error(
        "no languages found in {}; pass --langs or add sub-directories holding 0.wav..9.wav",
        dir.display()
    )]
    NoLanguages { dir: PathBuf },

    /// The input directory could not be listed.
    #[error("cannot list {}: {source}", dir.display())]
    ReadDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// SoundId
// ---------------------------------------------------------------------------

/// Identifies one recording in the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SoundId {
    Digit { lang: String, digit: u8 },
    Beep,
}

impl fmt::Display for SoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoundId::Digit { lang, digit } => write!(f, "lang={lang} digit={digit}"),
            SoundId::Beep => f.write_str("beep"),
        }
    }
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// Path of `<dir>/<lang>/<digit>.wav`.
pub fn digit_path(dir: &Path, lang: &str, digit: u8) -> PathBuf {
    dir.join(lang).join(format!("{digit}.wav"))
}

/// `true` when `dir` holds every one of `0.wav`..`9.wav`.
pub fn has_all_digit_files(dir: &Path) -> bool {
    (0..DIGIT_COUNT).all(|d| dir.join(format!("{d}.wav")).is_file())
}

/// Split a comma-separated language list, trimming blanks and dropping
/// empty entries.
///
/// ```rust
/// use digit_sounds::corpus::parse_language_list;
///
/// assert_eq!(parse_language_list(" en, ,ru,"), vec!["en", "ru"]);
/// ```
pub fn parse_language_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

/// Every sub-directory of `dir` that holds a complete digit set, sorted.
pub fn discover_languages(dir: &Path) -> Result<Vec<String>, CorpusError> {
    let entries = std::fs::read_dir(dir).map_err(|source| CorpusError::ReadDir {
        dir: dir.to_path_buf(),
        source,
    })?;

    let mut langs = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if has_all_digit_files(&path) {
            langs.push(name.to_owned());
        } else {
            debug!("{}: incomplete digit set, skipped", path.display());
        }
    }
    langs.sort();
    Ok(langs)
}

/// The languages to process: the configured list if non-empty, otherwise
/// auto-detected. Always sorted and de-duplicated.
pub fn resolve_languages(input: &InputConfig) -> Result<Vec<String>, CorpusError> {
    let mut langs = if input.languages.is_empty() {
        discover_languages(&input.dir)?
    } else {
        input
            .languages
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect()
    };
    langs.sort();
    langs.dedup();

    if langs.is_empty() {
        return Err(CorpusError::NoLanguages {
            dir: input.dir.clone(),
        });
    }
    info!("languages: {}", langs.join(", "));
    Ok(langs)
}

/// One job per digit per language, in language then digit order, followed
/// by the beep job when `beep` is given.
pub fn build_jobs(dir: &Path, langs: &[String], beep: Option<&Path>) -> Vec<Job<SoundId>> {
    let mut jobs: Vec<Job<SoundId>> = langs
        .iter()
        .flat_map(|lang| {
            (0..DIGIT_COUNT).map(move |digit| {
                Job::new(
                    SoundId::Digit {
                        lang: lang.clone(),
                        digit,
                    },
                    digit_path(dir, lang, digit),
                )
            })
        })
        .collect();

    if let Some(beep) = beep {
        jobs.push(Job::new(SoundId::Beep, beep));
    }
    jobs
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn make_lang(root: &Path, lang: &str, digits: impl IntoIterator<Item = u8>) {
        let dir = root.join(lang);
        std::fs::create_dir_all(&dir).unwrap();
        for d in digits {
            std::fs::write(dir.join(format!("{d}.wav")), b"").unwrap();
        }
    }

    #[test]
    fn parse_language_list_trims_and_drops_empties() {
        assert_eq!(parse_language_list("en,es, ja ,,pt"), vec!["en", "es", "ja", "pt"]);
        assert!(parse_language_list("").is_empty());
        assert!(parse_language_list(" , ").is_empty());
    }

    #[test]
    fn discovery_requires_all_ten_digits() {
        let dir = tempdir().expect("temp dir");
        make_lang(dir.path(), "ru", 0..10);
        make_lang(dir.path(), "en", 0..10);
        make_lang(dir.path(), "zh", 0..9); // missing 9.wav
        std::fs::write(dir.path().join("beep.wav"), b"").unwrap();

        let langs = discover_languages(dir.path()).unwrap();
        assert_eq!(langs, vec!["en", "ru"]);
    }

    #[test]
    fn discovery_of_missing_dir_is_an_error() {
        let dir = tempdir().expect("temp dir");
        let err = discover_languages(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, CorpusError::ReadDir { .. }), "{err}");
    }

    #[test]
    fn explicit_languages_win_over_discovery() {
        let dir = tempdir().expect("temp dir");
        make_lang(dir.path(), "en", 0..10);

        let input = InputConfig {
            dir: dir.path().to_path_buf(),
            languages: vec!["pt".into(), " es".into(), "pt".into()],
            beep: None,
        };
        assert_eq!(resolve_languages(&input).unwrap(), vec!["es", "pt"]);
    }

    #[test]
    fn no_languages_is_an_error() {
        let dir = tempdir().expect("temp dir");
        let input = InputConfig {
            dir: dir.path().to_path_buf(),
            ..InputConfig::default()
        };
        let err = resolve_languages(&input).unwrap_err();
        assert!(matches!(err, CorpusError::NoLanguages { .. }), "{err}");
        assert!(err.to_string().contains("--langs"));
    }

    #[test]
    fn jobs_cover_every_digit_then_beep() {
        let root = Path::new("sounds");
        let langs = vec!["en".to_string(), "ja".to_string()];
        let jobs = build_jobs(root, &langs, Some(Path::new("sounds/beep.wav")));

        assert_eq!(jobs.len(), 21);
        assert_eq!(
            jobs[0].key,
            SoundId::Digit {
                lang: "en".into(),
                digit: 0
            }
        );
        assert_eq!(jobs[0].path, root.join("en").join("0.wav"));
        assert_eq!(
            jobs[19].key,
            SoundId::Digit {
                lang: "ja".into(),
                digit: 9
            }
        );
        assert_eq!(jobs[20].key, SoundId::Beep);
    }

    #[test]
    fn sound_id_display_names_language_and_digit() {
        let id = SoundId::Digit {
            lang: "es".into(),
            digit: 4,
        };
        assert_eq!(id.to_string(), "lang=es digit=4");
        assert_eq!(SoundId::Beep.to_string(), "beep");
    }
}
