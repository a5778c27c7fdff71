//! Whole-corpus run: discover → batch decode → assemble → emit.
//!
//! # Flow
//!
//! ```text
//! GeneratorConfig
//!   └─▶ resolve_languages ─▶ build_jobs (10 per language + beep)
//!         └─▶ Pipeline::process_batch (spawn_blocking per file)
//!               └─▶ assemble (FailurePolicy) ─▶ SoundTable
//!                     └─▶ render_source ─▶ output file
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;

use crate::audio::TargetFormat;
use crate::config::{FailurePolicy, GeneratorConfig};
use crate::corpus::{build_jobs, resolve_languages, CorpusError, SoundId, DIGIT_COUNT};
use crate::emit::{render_source, LanguageSounds, SoundTable, SourceLayout};

use super::batch::JobOutcome;
use super::runner::{Pipeline, PipelineError};

// ---------------------------------------------------------------------------
// GenerateError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Corpus(#[from] CorpusError),

    /// A file failed under [`FailurePolicy::FailFast`].
    #[error("{id}: {source}")]
    Sound {
        id: SoundId,
        #[source]
        source: PipelineError,
    },

    /// [`FailurePolicy::KeepGoing`] dropped every language.
    #[error("every language had at least one failed digit; nothing to emit")]
    NothingToEmit,

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Runs the decode pipeline over a whole corpus and writes the source file.
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
    pipeline: Pipeline,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            pipeline: Pipeline::default(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Decode every recording and assemble the table.
    pub async fn build_table(&self) -> Result<SoundTable, GenerateError> {
        let input = &self.config.input;
        let langs = resolve_languages(input)?;

        let beep_path = self.config.beep_path();
        let beep = if beep_path.is_file() {
            Some(beep_path)
        } else {
            info!("beep: {} not found; BEEP_SOUND omitted", beep_path.display());
            None
        };

        let jobs = build_jobs(&input.dir, &langs, beep.as_deref());
        info!("decoding {} files", jobs.len());
        let outcomes = self
            .pipeline
            .process_batch(jobs, self.config.batch.max_parallel_files)
            .await;

        assemble(
            &langs,
            outcomes,
            *self.pipeline.target(),
            self.config.batch.failure_policy,
        )
    }

    /// Build the table, render it and write the output file. Returns the
    /// table that was written.
    pub async fn run(&self) -> Result<SoundTable, GenerateError> {
        let table = self.build_table().await?;
        let layout = SourceLayout {
            bytes_per_line: self.config.output.bytes_per_line,
            digit_bytes_per_line: self.config.output.digit_bytes_per_line,
        };
        let source = render_source(&table, layout);
        write_output(&self.config.output.file, &source)?;
        info!(
            "wrote {} ({} bytes, {} languages{})",
            self.config.output.file.display(),
            source.len(),
            table.languages.len(),
            if table.beep.is_some() { ", beep" } else { "" }
        );
        Ok(table)
    }
}

fn write_output(path: &Path, source: &str) -> Result<(), GenerateError> {
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, source)
    };
    write().map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// assemble
// ---------------------------------------------------------------------------

/// Fold batch outcomes into a [`SoundTable`] under `policy`.
///
/// With [`FailurePolicy::FailFast`] the first failure in job order is
/// returned. With [`FailurePolicy::KeepGoing`] failures are logged; a
/// language with any failed digit is left out and a failed beep is omitted.
/// A beep that decodes to no samples is omitted under either policy.
pub fn assemble(
    langs: &[String],
    outcomes: Vec<JobOutcome<SoundId>>,
    target: TargetFormat,
    policy: FailurePolicy,
) -> Result<SoundTable, GenerateError> {
    let mut digits: BTreeMap<String, [Option<Vec<u8>>; 10]> = langs
        .iter()
        .map(|l| (l.clone(), Default::default()))
        .collect();
    let mut beep = None;

    for outcome in outcomes {
        let samples = match outcome.result {
            Ok(samples) => samples,
            Err(source) => match policy {
                FailurePolicy::FailFast => {
                    return Err(GenerateError::Sound {
                        id: outcome.key,
                        source,
                    })
                }
                FailurePolicy::KeepGoing => {
                    warn!("{}: {source}; skipped", outcome.key);
                    continue;
                }
            },
        };

        if samples.is_empty() {
            warn!("{}: {} decoded to zero samples", outcome.key, outcome.path.display());
        }

        match outcome.key {
            SoundId::Digit { lang, digit } => {
                info!("   - {lang}/{digit}.wav -> {} samples", samples.len());
                if let Some(slot) = digits
                    .get_mut(&lang)
                    .and_then(|set| set.get_mut(digit as usize))
                {
                    *slot = Some(samples);
                }
            }
            SoundId::Beep if samples.is_empty() => {
                warn!("beep: no samples; BEEP_SOUND omitted");
            }
            SoundId::Beep => {
                info!("beep -> {} samples", samples.len());
                beep = Some(samples);
            }
        }
    }

    let mut languages = Vec::with_capacity(digits.len());
    for (lang, set) in digits {
        let missing = set.iter().filter(|d| d.is_none()).count();
        if missing > 0 {
            warn!("{lang}: {missing} of {DIGIT_COUNT} digits missing; language left out");
            continue;
        }
        languages.push(LanguageSounds {
            lang,
            digits: set.map(Option::unwrap_or_default),
        });
    }

    if languages.is_empty() {
        return Err(GenerateError::NothingToEmit);
    }

    Ok(SoundTable {
        target,
        languages,
        beep,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::audio::wav::fixtures::{pcm16_mono, pcm_wav};
    use crate::audio::DecodeError;

    /// Write `<root>/<lang>/0..9.wav`, digit `d` as four 8 kHz samples of `d`.
    fn write_lang(root: &Path, lang: &str) {
        let dir = root.join(lang);
        std::fs::create_dir_all(&dir).unwrap();
        for d in 0..10u8 {
            std::fs::write(dir.join(format!("{d}.wav")), pcm_wav(1, 8_000, 8, &[d; 4])).unwrap();
        }
    }

    fn config_for(root: &Path) -> GeneratorConfig {
        let mut cfg = GeneratorConfig::default();
        cfg.input.dir = root.to_path_buf();
        cfg.output.file = root.join("out").join("sounds.rs");
        cfg
    }

    #[tokio::test]
    async fn full_run_writes_sorted_languages_and_beep() {
        let dir = tempdir().expect("temp dir");
        write_lang(dir.path(), "ru");
        write_lang(dir.path(), "en");
        std::fs::write(dir.path().join("beep.wav"), pcm16_mono(16_000, &[0; 8])).unwrap();

        let cfg = config_for(dir.path());
        let table = Generator::new(cfg.clone()).run().await.unwrap();

        let langs: Vec<_> = table.languages.iter().map(|l| l.lang.as_str()).collect();
        assert_eq!(langs, vec!["en", "ru"]);
        assert_eq!(table.languages[0].digits[7], vec![7u8; 4]);
        assert_eq!(table.beep, Some(vec![128u8; 4]));

        let src = std::fs::read_to_string(&cfg.output.file).unwrap();
        assert!(src.contains("(\"en\", ["));
        assert!(src.contains("(\"ru\", ["));
        assert!(src.contains("pub static BEEP_SOUND"));
    }

    #[tokio::test]
    async fn missing_beep_is_not_an_error() {
        let dir = tempdir().expect("temp dir");
        write_lang(dir.path(), "es");

        let table = Generator::new(config_for(dir.path()))
            .build_table()
            .await
            .unwrap();
        assert!(table.beep.is_none());
        assert_eq!(table.languages.len(), 1);
    }

    #[tokio::test]
    async fn silent_beep_is_omitted() {
        let dir = tempdir().expect("temp dir");
        write_lang(dir.path(), "de");
        std::fs::write(dir.path().join("beep.wav"), pcm_wav(1, 8_000, 8, &[])).unwrap();

        let cfg = config_for(dir.path());
        let table = Generator::new(cfg.clone()).run().await.unwrap();
        assert!(table.beep.is_none());

        let src = std::fs::read_to_string(&cfg.output.file).unwrap();
        assert!(!src.contains("BEEP_SOUND"));
    }

    #[tokio::test]
    async fn fail_fast_names_language_and_digit() {
        let dir = tempdir().expect("temp dir");
        write_lang(dir.path(), "ja");
        std::fs::write(dir.path().join("ja").join("5.wav"), pcm_wav(1, 8_000, 24, &[0; 3]))
            .unwrap();

        let err = Generator::new(config_for(dir.path()))
            .build_table()
            .await
            .unwrap_err();
        match &err {
            GenerateError::Sound { id, source } => {
                assert_eq!(
                    id,
                    &SoundId::Digit {
                        lang: "ja".into(),
                        digit: 5
                    }
                );
                assert_eq!(
                    source.decode_error(),
                    Some(&DecodeError::UnsupportedBitDepth { bits: 24 })
                );
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("lang=ja digit=5"), "{err}");
    }

    #[tokio::test]
    async fn keep_going_drops_only_the_broken_language() {
        let dir = tempdir().expect("temp dir");
        write_lang(dir.path(), "en");
        write_lang(dir.path(), "pt");
        std::fs::write(dir.path().join("pt").join("0.wav"), b"RIFF").unwrap();

        let mut cfg = config_for(dir.path());
        cfg.batch.failure_policy = FailurePolicy::KeepGoing;

        let table = Generator::new(cfg).build_table().await.unwrap();
        let langs: Vec<_> = table.languages.iter().map(|l| l.lang.as_str()).collect();
        assert_eq!(langs, vec!["en"]);
    }

    #[tokio::test]
    async fn keep_going_with_nothing_left_is_an_error() {
        let dir = tempdir().expect("temp dir");
        write_lang(dir.path(), "zh");
        std::fs::write(dir.path().join("zh").join("9.wav"), b"").unwrap();

        let mut cfg = config_for(dir.path());
        cfg.batch.failure_policy = FailurePolicy::KeepGoing;

        let err = Generator::new(cfg).build_table().await.unwrap_err();
        assert!(matches!(err, GenerateError::NothingToEmit), "{err}");
    }

    #[tokio::test]
    async fn explicit_language_without_files_fails_fast() {
        let dir = tempdir().expect("temp dir");
        let mut cfg = config_for(dir.path());
        cfg.input.languages = vec!["xx".into()];

        let err = Generator::new(cfg).build_table().await.unwrap_err();
        match err {
            GenerateError::Sound { source, .. } => {
                assert!(matches!(source, PipelineError::Read { .. }))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn empty_corpus_reports_no_languages() {
        let dir = tempdir().expect("temp dir");
        let err = Generator::new(config_for(dir.path()))
            .build_table()
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::Corpus(CorpusError::NoLanguages { .. })));
    }
}
