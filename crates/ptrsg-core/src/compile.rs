//! Build step: turn provisioned sources into runnable artifacts.
//!
//! Interpreted languages pass straight through as [`Artifact::Script`].
//! Compiled languages are built with optimisations disabled into the same run
//! directory. The first failing build aborts the run.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::Verbosity;
use crate::error::{Error, Result};
use crate::workload::{Artifact, Toolchain, Workload};
use crate::workloads::helpers::{configure_stdio, describe};

/// Produce the runnable artifact for one workload.
pub fn build(workload: &dyn Workload, source: &Path, verbosity: Verbosity) -> Result<Artifact> {
    let info = workload.info();
    let compiler = match info.toolchain {
        Toolchain::Interpreter(tool) => {
            return Ok(Artifact::Script {
                language: info.name,
                interpreter: tool.program,
                source: source.to_path_buf(),
            });
        }
        Toolchain::Compiler(tool) => tool,
    };

    let dir = source.parent().unwrap_or_else(|| Path::new("."));
    let executable = dir.join(workload.executable_file_name());

    let mut cmd = Command::new(compiler.program);
    cmd.args(workload.compile_args(source, &executable));
    configure_stdio(&mut cmd, verbosity);
    log::debug!("{} compile: {}", info.name, describe(&cmd));

    let status = cmd.status().map_err(|source| Error::Launch {
        language: info.name,
        program: compiler.program.to_string(),
        source,
    })?;
    if !status.success() {
        return Err(Error::Compile {
            language: info.name,
            compiler: compiler.program.to_string(),
            status,
        });
    }

    Ok(Artifact::Binary {
        language: info.name,
        executable,
    })
}

/// Build every workload in enumeration order, stopping at the first failure.
///
/// `sources` must hold a path for every workload (see
/// [`crate::provision::provision_all`]).
pub fn build_all(
    workloads: &[Box<dyn Workload>],
    sources: &BTreeMap<&'static str, PathBuf>,
    verbosity: Verbosity,
) -> Result<Vec<Artifact>> {
    let mut artifacts = Vec::with_capacity(workloads.len());
    for w in workloads {
        let source = sources
            .get(w.name())
            .ok_or(Error::Unprovisioned(w.name()))?;
        artifacts.push(build(w.as_ref(), source, verbosity)?);
    }
    Ok(artifacts)
}
