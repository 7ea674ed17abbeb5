//! Execution scheduler: run every artifact exactly once and time it.
//!
//! Architecture:
//! 1. Spawn each artifact as a child process, stdin closed
//! 2. Measure wall-clock time from just before spawn until exit
//! 3. Parallel mode: one scoped thread per artifact, results merged into a
//!    mutex-guarded [`Timings`], full join before anything is read
//! 4. Queued mode: one artifact at a time, in enumeration order
//! 5. Any launch failure or non-zero exit aborts the run; no partial
//!    timing set ever leaves this module
//! 6. The interrupt flag is checked before every launch

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use crate::config::{Schedule, Verbosity};
use crate::error::{Error, Result};
use crate::workload::Artifact;
use crate::workloads::helpers::{configure_stdio, describe};

/// Nanosecond execution time per language, iterated in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timings {
    records: BTreeMap<String, u64>,
}

impl Timings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a measurement. Returns `false` (keeping the first value) if the
    /// language was already recorded.
    pub fn record(&mut self, language: &str, nanos: u64) -> bool {
        if self.records.contains_key(language) {
            return false;
        }
        self.records.insert(language.to_string(), nanos);
        true
    }

    pub fn get(&self, language: &str) -> Option<u64> {
        self.records.get(language).copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `(language, nanos)` pairs sorted by language.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.records.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Recorded languages, sorted.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<(S, u64)> for Timings {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut timings = Self::new();
        for (language, nanos) in iter {
            timings.record(language.as_ref(), nanos);
        }
        timings
    }
}

/// Run one artifact to completion and return its wall-clock time in ns.
pub fn timed_run(artifact: &Artifact, verbosity: Verbosity) -> Result<u64> {
    let mut cmd = artifact.command();
    configure_stdio(&mut cmd, verbosity);
    log::debug!("running: {}", describe(&cmd));

    let t0 = Instant::now();
    let status = cmd.status().map_err(|source| Error::Launch {
        language: artifact.language(),
        program: artifact.program(),
        source,
    })?;
    let elapsed = t0.elapsed();

    if !status.success() {
        return Err(Error::Execution {
            language: artifact.language(),
            status,
        });
    }

    Ok(u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX))
}

/// Execute every artifact once under the given schedule.
///
/// Nothing new is launched once `interrupted` is set.
pub fn run(
    artifacts: &[Artifact],
    schedule: Schedule,
    verbosity: Verbosity,
    interrupted: &AtomicBool,
) -> Result<Timings> {
    let timings = match schedule {
        Schedule::Parallel => run_parallel(artifacts, verbosity, interrupted)?,
        Schedule::Queued => run_queued(artifacts, verbosity, interrupted)?,
    };
    ensure_complete(artifacts, &timings)?;
    Ok(timings)
}

fn check_interrupt(interrupted: &AtomicBool) -> Result<()> {
    if interrupted.load(Ordering::SeqCst) {
        Err(Error::Interrupted)
    } else {
        Ok(())
    }
}

fn run_queued(artifacts: &[Artifact], verbosity: Verbosity, interrupted: &AtomicBool) -> Result<Timings> {
    let mut timings = Timings::new();
    for artifact in artifacts {
        check_interrupt(interrupted)?;
        log::info!("Running {}...", artifact.language());
        let nanos = timed_run(artifact, verbosity)?;
        timings.record(artifact.language(), nanos);
    }
    Ok(timings)
}

fn run_parallel(artifacts: &[Artifact], verbosity: Verbosity, interrupted: &AtomicBool) -> Result<Timings> {
    check_interrupt(interrupted)?;
    log::info!("Running {} workloads in parallel...", artifacts.len());
    let timings = Mutex::new(Timings::new());

    let outcomes: Vec<Result<()>> = std::thread::scope(|s| {
        let handles: Vec<_> = artifacts
            .iter()
            .map(|artifact| {
                let timings = &timings;
                let handle = s.spawn(move || -> Result<()> {
                    let nanos = timed_run(artifact, verbosity)?;
                    timings
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .record(artifact.language(), nanos);
                    Ok(())
                });
                (artifact.language(), handle)
            })
            .collect();

        // Barrier: every worker is joined before any outcome is inspected.
        handles
            .into_iter()
            .map(|(language, handle)| {
                handle
                    .join()
                    .unwrap_or(Err(Error::WorkerPanicked { language }))
            })
            .collect()
    });

    let mut first_err = None;
    for outcome in outcomes {
        if let Err(e) = outcome {
            if first_err.is_none() {
                first_err = Some(e);
            } else {
                log::error!("{e}");
            }
        }
    }
    if let Some(e) = first_err {
        return Err(e);
    }

    Ok(timings.into_inner().unwrap_or_else(PoisonError::into_inner))
}

fn ensure_complete(artifacts: &[Artifact], timings: &Timings) -> Result<()> {
    let missing: Vec<String> = artifacts
        .iter()
        .map(Artifact::language)
        .filter(|language| timings.get(language).is_none())
        .map(str::to_string)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::IncompleteTimings(missing))
    }
}
