//! # ptrsg-core
//!
//! **Seeds from the scheduling noise of six language runtimes.**
//!
//! `ptrsg-core` runs the same small workload (build 100,000 strings and sort
//! them) under a set of interpreters and compilers, measures how long each
//! run takes in nanoseconds, and hashes those timings into a seed of 1 to 512
//! bits.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ptrsg_core::{RunConfig, SeedBits, SeedGenerator};
//!
//! let config = RunConfig {
//!     seed_bits: SeedBits::new(128).unwrap(),
//!     ..RunConfig::default()
//! };
//! let report = SeedGenerator::new(config).run().unwrap();
//! println!("{}", report.seed());
//! ```
//!
//! ## Architecture
//!
//! Preflight → Provision → Build → Schedule → Conditioning → Seed
//!
//! Every language implements the [`Workload`] trait. The [`SeedGenerator`]
//! checks that the required tools exist, writes each payload into a
//! run-scoped directory, compiles the languages that need it, times every
//! artifact (concurrently by default, or queued one at a time) and folds the
//! timings into a BLAKE2b-512 digest that is truncated to the requested
//! width.
//!
//! The output is not an audited RNG. Wall-clock jitter varies from run to
//! run, so seeds differ across invocations, but nothing here guarantees
//! uniform entropy.

pub mod compile;
pub mod conditioning;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod preflight;
pub mod provision;
pub mod scheduler;
#[cfg(test)]
mod testing;
pub mod workload;
pub mod workloads;

pub use conditioning::{Extraction, Seed, blake2b_512, entropy_buffer, extract, truncate_digest};
pub use config::{ChaosLevel, RunConfig, Schedule, SeedBits, Verbosity};
pub use error::{Error, Result};
pub use pipeline::{SeedGenerator, SeedReport};
pub use preflight::{check_tools, required_tools};
pub use provision::RunDir;
pub use scheduler::Timings;
pub use workload::{Artifact, Tool, Toolchain, Workload, WorkloadInfo};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
