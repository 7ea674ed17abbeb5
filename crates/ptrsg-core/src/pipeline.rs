//! Seed generation pipeline.
//!
//! Architecture:
//! 1. Preflight: every required tool must answer its probe
//! 2. Create a run-scoped directory
//! 3. Provision every payload into it
//! 4. Compile the languages that need it
//! 5. Time every artifact (parallel or queued)
//! 6. Hash the complete timing set into a seed
//!
//! Any failure aborts the run. The run directory is removed on the way out
//! whether or not a seed was produced.
//!
//! An interrupt flag (see [`SeedGenerator::interrupt_flag`]) is checked
//! between stages and before every launch. Once it is set the run ends with
//! [`Error::Interrupted`], including when the interrupt also killed a child
//! and that child's failure surfaced first.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::compile;
use crate::conditioning::{Extraction, Seed, extract};
use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::preflight;
use crate::provision::{self, RunDir};
use crate::scheduler::{self, Timings};
use crate::workload::Workload;
use crate::workloads;

/// Everything a successful run produced.
#[derive(Debug, Clone)]
pub struct SeedReport {
    pub timings: Timings,
    pub extraction: Extraction,
}

impl SeedReport {
    pub fn seed(&self) -> &Seed {
        &self.extraction.seed
    }
}

/// Runs the configured workloads and folds their timings into a seed.
pub struct SeedGenerator {
    config: RunConfig,
    workloads: Vec<Box<dyn Workload>>,
    interrupted: Arc<AtomicBool>,
}

impl SeedGenerator {
    /// Generator for the workloads selected by `config.chaos`.
    pub fn new(config: RunConfig) -> Self {
        Self::with_workloads(config, workloads::select(config.chaos))
    }

    /// Generator for an explicit workload set. The chaos level in `config`
    /// is ignored.
    pub fn with_workloads(config: RunConfig, workloads: Vec<Box<dyn Workload>>) -> Self {
        Self {
            config,
            workloads,
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shared flag that stops the run once set. Hand it to a signal handler.
    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupted)
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn workloads(&self) -> &[Box<dyn Workload>] {
        &self.workloads
    }

    /// Number of participating workloads.
    pub fn workload_count(&self) -> usize {
        self.workloads.len()
    }

    /// Run only the preflight gate.
    pub fn preflight(&self) -> Result<()> {
        preflight::check(&self.workloads, self.config.verbosity)
    }

    /// Run the full pipeline in a fresh directory under the system temp dir.
    pub fn run(&self) -> Result<SeedReport> {
        self.preflight()?;
        let run_dir = RunDir::new()?;
        self.run_in(&run_dir)
    }

    /// Run everything after preflight inside an existing run directory.
    pub fn run_in(&self, run_dir: &RunDir) -> Result<SeedReport> {
        self.stages(run_dir).map_err(|e| {
            if self.is_interrupted() {
                Error::Interrupted
            } else {
                e
            }
        })
    }

    fn stages(&self, run_dir: &RunDir) -> Result<SeedReport> {
        let verbosity = self.config.verbosity;

        self.check_interrupt()?;
        log::info!("Preparing files in {}...", run_dir.path().display());
        let sources = provision::provision_all(&self.workloads, run_dir.path())?;

        self.check_interrupt()?;
        let artifacts = compile::build_all(&self.workloads, &sources, verbosity)?;

        self.check_interrupt()?;
        let timings = scheduler::run(&artifacts, self.config.schedule, verbosity, &self.interrupted)?;

        self.check_interrupt()?;
        let extraction = extract(&timings, self.config.seed_bits);
        log::debug!("Full Blake2b: {}", extraction.digest_hex());

        Ok(SeedReport {
            timings,
            extraction,
        })
    }

    fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    fn check_interrupt(&self) -> Result<()> {
        if self.is_interrupted() {
            Err(Error::Interrupted)
        } else {
            Ok(())
        }
    }
}
