//! Application entry point: digit sound table generator.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Parse command-line flags.
//! 3. Load [`GeneratorConfig`] (explicit `--config` path or the platform
//!    `settings.toml`; defaults when missing) and apply flag overrides.
//! 4. Optionally persist the merged config (`--write-config`).
//! 5. Create the [`tokio`] runtime, sizing the blocking pool to
//!    `batch.max_parallel_files` (the batch runner enforces the same bound).
//! 6. Run the [`Generator`] to completion.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use digit_sounds::{
    config::{AppPaths, FailurePolicy, GeneratorConfig},
    corpus::parse_language_list,
    pipeline::Generator,
};

/// Command-line arguments. Every flag overrides the matching
/// `settings.toml` value.
#[derive(Parser, Debug)]
#[command(name = "digit-sounds")]
#[command(about = "Build embeddable 8 kHz u8 PCM tables from spoken-digit WAV files")]
#[command(version)]
struct Args {
    /// Input directory containing language sub-folders (en, es, ...)
    #[arg(long = "in", env = "DIGIT_SOUNDS_IN")]
    input: Option<PathBuf>,

    /// Generated Rust source file
    #[arg(long = "out", env = "DIGIT_SOUNDS_OUT")]
    output: Option<PathBuf>,

    /// Comma-separated languages to include (default: auto-detect)
    #[arg(long, env = "DIGIT_SOUNDS_LANGS")]
    langs: Option<String>,

    /// Beep cue file (default: <in>/beep.wav; skipped when missing)
    #[arg(long, env = "DIGIT_SOUNDS_BEEP")]
    beep: Option<PathBuf>,

    /// Settings file (default: platform config dir)
    #[arg(long, env = "DIGIT_SOUNDS_CONFIG")]
    config: Option<PathBuf>,

    /// Skip files that fail to decode instead of aborting
    #[arg(long)]
    keep_going: bool,

    /// Save the merged settings back to the settings file
    #[arg(long)]
    write_config: bool,
}

impl Args {
    fn apply(&self, config: &mut GeneratorConfig) {
        if let Some(dir) = &self.input {
            config.input.dir = dir.clone();
        }
        if let Some(file) = &self.output {
            config.output.file = file.clone();
        }
        if let Some(langs) = &self.langs {
            config.input.languages = parse_language_list(langs);
        }
        if let Some(beep) = &self.beep {
            config.input.beep = Some(beep.clone());
        }
        if self.keep_going {
            config.batch.failure_policy = FailurePolicy::KeepGoing;
        }
    }
}

fn main() -> Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 2. Flags
    let args = Args::parse();

    // 3. Configuration
    let settings_file = args
        .config
        .clone()
        .unwrap_or_else(|| AppPaths::new().settings_file);
    let mut config = GeneratorConfig::load_from(&settings_file)
        .with_context(|| format!("loading settings from {}", settings_file.display()))?;
    args.apply(&mut config);
    log::debug!("effective config: {config:?}");

    // 4. Persist
    if args.write_config {
        config.save_to(&settings_file)?;
        log::info!("saved settings to {}", settings_file.display());
    }

    // 5. Tokio runtime
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .max_blocking_threads(config.batch.max_parallel_files.max(1))
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    // 6. Generate
    let generator = Generator::new(config);
    rt.block_on(generator.run())?;
    Ok(())
}
