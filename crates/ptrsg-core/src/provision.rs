//! Workload provisioning into a run-scoped directory.
//!
//! # Storage Format
//!
//! Each run gets a fresh `ptrsg_XXXXXX` directory under the system temp dir:
//! - `task.<ext>`: one payload per selected language
//! - `task_<lang>.exe`: compiled executables (see [`crate::compile`])
//!
//! The directory is deleted when the [`RunDir`] is dropped, on success and
//! on error alike.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::{Error, Result};
use crate::workload::Workload;

const RUN_DIR_PREFIX: &str = "ptrsg_";

/// Ephemeral working directory owned by exactly one run.
#[derive(Debug)]
pub struct RunDir {
    dir: TempDir,
}

impl RunDir {
    /// Create a uniquely named directory under the system temp dir.
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(RUN_DIR_PREFIX)
            .tempdir()
            .map_err(Error::RunDir)?;
        Ok(Self { dir })
    }

    /// Create the run directory inside `parent` instead of the temp dir.
    pub fn new_in(parent: impl AsRef<Path>) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(RUN_DIR_PREFIX)
            .tempdir_in(parent)
            .map_err(Error::RunDir)?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the directory now, reporting any I/O error.
    pub fn close(self) -> Result<()> {
        self.dir.close().map_err(Error::RunDir)
    }
}

/// Write one workload's payload to `dir` and return the file path.
pub fn provision(workload: &dyn Workload, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(workload.source_file_name());
    fs::write(&path, workload.info().payload).map_err(|source| Error::Provision {
        language: workload.name(),
        path: path.clone(),
        source,
    })?;
    log::debug!("wrote {} workload to {}", workload.name(), path.display());
    Ok(path)
}

/// Write every workload's payload to `dir`.
///
/// Either every workload is written or an error is returned; callers never
/// see a partial set. Names must be unique, since they key both the file
/// names and the timing record.
pub fn provision_all(
    workloads: &[Box<dyn Workload>],
    dir: &Path,
) -> Result<BTreeMap<&'static str, PathBuf>> {
    ensure_unique(workloads)?;
    workloads
        .iter()
        .map(|w| provision(w.as_ref(), dir).map(|path| (w.name(), path)))
        .collect()
}

fn ensure_unique(workloads: &[Box<dyn Workload>]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for w in workloads {
        if !seen.insert(w.name()) {
            return Err(Error::DuplicateWorkload(w.name()));
        }
    }
    Ok(())
}
