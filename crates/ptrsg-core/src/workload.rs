//! Workload provider trait and the artifacts it produces.
//!
//! Every language implements the [`Workload`] trait, which provides metadata
//! via [`WorkloadInfo`]: the embedded payload, the source suffix and the
//! toolchain that turns the payload into something runnable.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::ChaosLevel;

/// An external executable the pipeline depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tool {
    /// Program name resolved through `PATH` (e.g. `"g++"`).
    pub program: &'static str,
    /// Arguments that make the program print a version and exit 0.
    pub probe_args: &'static [&'static str],
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)
    }
}

/// How a payload becomes runnable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toolchain {
    /// Run the source file directly: `<tool> <source>`.
    Interpreter(Tool),
    /// Compile ahead of time and run the resulting executable.
    Compiler(Tool),
}

impl Toolchain {
    pub fn tool(&self) -> Tool {
        match *self {
            Self::Interpreter(tool) | Self::Compiler(tool) => tool,
        }
    }

    pub fn is_compiled(&self) -> bool {
        matches!(self, Self::Compiler(_))
    }
}

/// Metadata about a workload.
#[derive(Debug, Clone)]
pub struct WorkloadInfo {
    /// Language identifier (e.g. `"lua"`). Unique across the registry.
    pub name: &'static str,
    /// One-line human-readable description.
    pub description: &'static str,
    /// Conventional source suffix without the dot.
    pub extension: &'static str,
    pub toolchain: Toolchain,
    /// Lowest chaos level that includes this workload.
    pub min_chaos: ChaosLevel,
    /// Program text written verbatim to the source file.
    pub payload: &'static str,
}

/// Trait that every workload provider must implement.
pub trait Workload: Send + Sync {
    /// Workload metadata.
    fn info(&self) -> &WorkloadInfo;

    /// Compiler arguments that build `source` into `executable`.
    ///
    /// Only consulted when the toolchain is a [`Toolchain::Compiler`].
    fn compile_args(&self, source: &Path, executable: &Path) -> Vec<OsString> {
        vec![
            source.as_os_str().to_owned(),
            "-o".into(),
            executable.as_os_str().to_owned(),
        ]
    }

    /// Convenience: name from info.
    fn name(&self) -> &'static str {
        self.info().name
    }

    /// File name the payload is written to inside the run directory.
    fn source_file_name(&self) -> String {
        format!("task.{}", self.info().extension)
    }

    /// File name of the compiled executable inside the run directory.
    fn executable_file_name(&self) -> String {
        format!("task_{}.exe", self.info().name)
    }

    /// Whether the workload takes part at the given chaos level.
    fn enabled_at(&self, chaos: ChaosLevel) -> bool {
        chaos >= self.info().min_chaos
    }
}

/// The runnable form of a workload, owned by a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    /// Source file handed to an interpreter.
    Script {
        language: &'static str,
        interpreter: &'static str,
        source: PathBuf,
    },
    /// Compiled executable.
    Binary {
        language: &'static str,
        executable: PathBuf,
    },
}

impl Artifact {
    pub fn language(&self) -> &'static str {
        match self {
            Self::Script { language, .. } | Self::Binary { language, .. } => language,
        }
    }

    /// The program that gets spawned.
    pub fn program(&self) -> String {
        match self {
            Self::Script { interpreter, .. } => (*interpreter).to_string(),
            Self::Binary { executable, .. } => executable.display().to_string(),
        }
    }

    /// Fresh command that runs this artifact. Stdio is left to the caller.
    pub fn command(&self) -> Command {
        match self {
            Self::Script {
                interpreter, source, ..
            } => {
                let mut cmd = Command::new(interpreter);
                cmd.arg(source);
                cmd
            }
            Self::Binary { executable, .. } => Command::new(executable),
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Script {
                interpreter, source, ..
            } => write!(f, "[{interpreter} {}]", source.display()),
            Self::Binary { executable, .. } => write!(f, "[{}]", executable.display()),
        }
    }
}
