//! Concurrent processing of many files.
//!
//! Each [`Job`] runs [`Pipeline::process`] on its own
//! `tokio::task::spawn_blocking` task, with at most `max_parallel` tasks
//! holding a [`Semaphore`] permit at once. Outcomes are returned in job
//! order whether they succeeded or not; deciding what a failure means for
//! the whole run is left to the caller.

use std::path::PathBuf;
use std::sync::Arc;

use log::debug;
use tokio::sync::Semaphore;
use tokio::task::JoinError;

use super::runner::{Pipeline, PipelineError};

/// One file to process, tagged with a caller-defined key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job<K> {
    pub key: K,
    pub path: PathBuf,
}

impl<K> Job<K> {
    pub fn new(key: K, path: impl Into<PathBuf>) -> Self {
        Self {
            key,
            path: path.into(),
        }
    }
}

/// Result of one [`Job`].
#[derive(Debug)]
pub struct JobOutcome<K> {
    pub key: K,
    pub path: PathBuf,
    pub result: Result<Vec<u8>, PipelineError>,
}

impl Pipeline {
    /// Process every job concurrently, at most `max_parallel` files at a
    /// time (0 is treated as 1), and return the outcomes in job order.
    ///
    /// A failing file never cancels its siblings. A worker task that
    /// panics is reported as [`PipelineError::Worker`] for its file.
    pub async fn process_batch<K>(
        &self,
        jobs: Vec<Job<K>>,
        max_parallel: usize,
    ) -> Vec<JobOutcome<K>>
    where
        K: Clone + Send + 'static,
    {
        let pipeline = *self;
        let tagged: Vec<_> = jobs
            .into_iter()
            .map(|job| ((job.key.clone(), job.path.clone()), job))
            .collect();
        let (ids, jobs): (Vec<_>, Vec<_>) = tagged.into_iter().unzip();

        let results = run_bounded(jobs, max_parallel, move |job: Job<K>| {
            let result = pipeline.process(&job.path);
            JobOutcome {
                key: job.key,
                path: job.path,
                result,
            }
        })
        .await;

        ids.into_iter()
            .zip(results)
            .map(|((key, path), joined)| {
                let outcome = joined.unwrap_or_else(|e| JobOutcome {
                    key,
                    result: Err(PipelineError::Worker {
                        path: path.clone(),
                        message: e.to_string(),
                    }),
                    path,
                });
                if let Ok(samples) = &outcome.result {
                    debug!("{} -> {} samples", outcome.path.display(), samples.len());
                }
                outcome
            })
            .collect()
    }
}

/// Run `work` on every input via `spawn_blocking`, with no more than
/// `max_parallel` (at least 1) calls in flight. Results come back in input
/// order.
async fn run_bounded<T, R, F>(
    inputs: Vec<T>,
    max_parallel: usize,
    work: F,
) -> Vec<Result<R, JoinError>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> R + Clone + Send + 'static,
{
    let limit = Arc::new(Semaphore::new(max_parallel.max(1)));
    let mut handles = Vec::with_capacity(inputs.len());
    for input in inputs {
        // The semaphore is never closed, so acquiring only waits.
        let permit = Arc::clone(&limit).acquire_owned().await.ok();
        let work = work.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            let _permit = permit;
            work(input)
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await);
    }
    results
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

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn outcomes_keep_job_order() {
        let dir = tempdir().expect("temp dir");
        let mut jobs = Vec::new();
        for i in 0..8u8 {
            let path = dir.path().join(format!("{i}.wav"));
            std::fs::write(&path, pcm_wav(1, 8_000, 8, &[i; 4])).unwrap();
            jobs.push(Job::new(i, path));
        }

        let outcomes = Pipeline::default().process_batch(jobs, 3).await;

        assert_eq!(outcomes.len(), 8);
        for (i, outcome) in outcomes.iter().enumerate() {
            assert_eq!(outcome.key as usize, i);
            assert_eq!(outcome.result.as_ref().unwrap(), &vec![i as u8; 4]);
        }
    }

    #[tokio::test]
    async fn one_bad_file_does_not_affect_the_others() {
        let dir = tempdir().expect("temp dir");
        let good = dir.path().join("good.wav");
        let bad = dir.path().join("bad.wav");
        std::fs::write(&good, pcm16_mono(16_000, &[0; 32])).unwrap();
        std::fs::write(&bad, b"definitely not audio").unwrap();

        let outcomes = Pipeline::default()
            .process_batch(
                vec![
                    Job::new("bad", bad.clone()),
                    Job::new("good", good.clone()),
                    Job::new("missing", dir.path().join("missing.wav")),
                ],
                4,
            )
            .await;

        assert_eq!(outcomes[0].key, "bad");
        let err = outcomes[0].result.as_ref().unwrap_err();
        assert_eq!(err.path(), bad.as_path());
        assert!(matches!(err.decode_error(), Some(DecodeError::Format(_))));

        assert_eq!(outcomes[1].result.as_ref().unwrap(), &vec![128u8; 16]);

        assert!(matches!(
            outcomes[2].result,
            Err(PipelineError::Read { .. })
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn never_runs_more_than_max_parallel_calls() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::time::Duration;

        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let (r, p) = (Arc::clone(&running), Arc::clone(&peak));

        let results = run_bounded((0..12).collect(), 3, move |i: usize| {
            let now = r.fetch_add(1, Ordering::SeqCst) + 1;
            p.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(5));
            r.fetch_sub(1, Ordering::SeqCst);
            i * 2
        })
        .await;

        let values: Vec<usize> = results.into_iter().map(Result::unwrap).collect();
        assert_eq!(values, (0..12).map(|i| i * 2).collect::<Vec<_>>());
        let peak = peak.load(Ordering::SeqCst);
        assert!((1..=3).contains(&peak), "peak concurrency {peak}");
    }

    #[tokio::test]
    async fn zero_limit_still_makes_progress() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("1.wav");
        std::fs::write(&path, pcm_wav(1, 8_000, 8, &[1; 4])).unwrap();

        let outcomes = Pipeline::default()
            .process_batch(vec![Job::new(1u8, path)], 0)
            .await;
        assert_eq!(outcomes[0].result.as_ref().unwrap(), &vec![1u8; 4]);
    }

    #[tokio::test]
    async fn empty_batch_returns_nothing() {
        let outcomes = Pipeline::default().process_batch::<u8>(Vec::new(), 4).await;
        assert!(outcomes.is_empty());
    }
}
