//! Pipeline error model.
//!
//! Every stage fails fast: nothing in the pipeline retries or recovers, so an
//! [`Error`] always means no seed was produced.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("preflight check failed: {} missing", .0.join(", "))]
    MissingTools(Vec<String>),

    #[error("failed to create run directory: {0}")]
    RunDir(#[source] io::Error),

    #[error("failed to write {language} workload to {}: {source}", path.display())]
    Provision {
        language: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("workload name {0} is used more than once")]
    DuplicateWorkload(&'static str),

    #[error("no provisioned source for {0}")]
    Unprovisioned(&'static str),

    #[error("failed to launch {program} for {language}: {source}")]
    Launch {
        language: &'static str,
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{compiler} failed to build the {language} workload ({status})")]
    Compile {
        language: &'static str,
        compiler: String,
        status: ExitStatus,
    },

    #[error("{language} workload failed ({status})")]
    Execution {
        language: &'static str,
        status: ExitStatus,
    },

    #[error("worker for {language} panicked")]
    WorkerPanicked { language: &'static str },

    #[error("no timing recorded for {}", .0.join(", "))]
    IncompleteTimings(Vec<String>),

    #[error("run interrupted")]
    Interrupted,
}

pub type Result<T> = std::result::Result<T, Error>;
