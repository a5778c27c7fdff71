//! Generator settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`.
//! Every table is `#[serde(default)]`, so a `settings.toml` only needs to
//! name the values it changes.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// FailurePolicy
// ---------------------------------------------------------------------------

/// What a batch run does when one file fails to decode.
///
/// | Variant   | Behaviour                                                    |
/// |-----------|--------------------------------------------------------------|
/// | FailFast  | Abort the run with the first error (in job order)            |
/// | KeepGoing | Log and skip; a language missing any digit is left out whole |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailurePolicy {
    FailFast,
    KeepGoing,
}

impl Default for FailurePolicy {
    fn default() -> Self {
        Self::FailFast
    }
}

// ---------------------------------------------------------------------------
// InputConfig
// ---------------------------------------------------------------------------

/// Where the recordings live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Directory holding one sub-directory per language (`en/0.wav` …).
    pub dir: PathBuf,
    /// Languages to include. Empty means auto-detect every sub-directory
    /// that holds all of `0.wav`..`9.wav`.
    pub languages: Vec<String>,
    /// Beep cue file. `None` means `<dir>/beep.wav`; a missing beep file is
    /// not an error.
    pub beep: Option<PathBuf>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            languages: Vec::new(),
            beep: None,
        }
    }
}

// ---------------------------------------------------------------------------
// OutputConfig
// ---------------------------------------------------------------------------

/// Where and how the generated source file is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the generated Rust source file.
    pub file: PathBuf,
    /// Bytes per line for `WAVE_HEADER` and `BEEP_SOUND`.
    pub bytes_per_line: usize,
    /// Bytes per line inside each digit table (nested one level deeper).
    pub digit_bytes_per_line: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("digit_sounds.rs"),
            bytes_per_line: 12,
            digit_bytes_per_line: 11,
        }
    }
}

// ---------------------------------------------------------------------------
// BatchConfig
// ---------------------------------------------------------------------------

/// Concurrency and error policy for the batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub failure_policy: FailurePolicy,
    /// Upper bound on files decoded at the same time (0 is treated as 1).
    pub max_parallel_files: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::default(),
            max_parallel_files: 16,
        }
    }
}

// ---------------------------------------------------------------------------
// GeneratorConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use digit_sounds::config::GeneratorConfig;
///
/// // Load (returns Default when file is missing)
/// let config = GeneratorConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub batch: BatchConfig,
}

impl GeneratorConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(GeneratorConfig::default())` when the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// The beep file to try: the configured one or `<dir>/beep.wav`.
    pub fn beep_path(&self) -> PathBuf {
        self.input
            .beep
            .clone()
            .unwrap_or_else(|| self.input.dir.join("beep.wav"))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
