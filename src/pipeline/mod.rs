//! Pipeline orchestration: from WAV files to the generated sound table.
//!
//! # Architecture
//!
//! ```text
//! decode_and_normalize(bytes, &TargetFormat)     ← the core entry point
//!        ▲
//! Pipeline::process(path)                         ← read file + wrap errors
//!        ▲
//! Pipeline::process_batch(jobs, max_parallel)     ← spawn_blocking per file
//!        ▲
//! Generator::run()                                ← corpus → SoundTable → file
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use digit_sounds::config::GeneratorConfig;
//! use digit_sounds::pipeline::Generator;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = GeneratorConfig::load().unwrap();
//!     let table = Generator::new(config).run().await.unwrap();
//!     println!("{} languages", table.languages.len());
//! }
//! ```

pub mod batch;
pub mod generate;
pub mod runner;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use batch::{Job, JobOutcome};
pub use generate::{assemble, GenerateError, Generator};
pub use runner::{decode_and_normalize, Pipeline, PipelineError};
