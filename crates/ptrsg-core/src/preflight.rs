//! Preflight gate: verify every external tool is invocable before any work
//! starts.
//!
//! All probes run concurrently; the gate reports every missing tool at once
//! rather than stopping at the first.

use std::sync::{Mutex, PoisonError};

use crate::config::Verbosity;
use crate::error::{Error, Result};
use crate::workload::{Tool, Workload};
use crate::workloads::helpers::{first_line, probe};

/// Deduplicated tools needed by `workloads`, in enumeration order.
pub fn required_tools(workloads: &[Box<dyn Workload>]) -> Vec<Tool> {
    let mut tools: Vec<Tool> = Vec::with_capacity(workloads.len());
    for w in workloads {
        let tool = w.info().toolchain.tool();
        if !tools.contains(&tool) {
            tools.push(tool);
        }
    }
    tools
}

/// Probe every tool in parallel.
///
/// Returns [`Error::MissingTools`] naming each tool that could not be
/// spawned or exited non-zero, in the order the tools were given.
pub fn check_tools(tools: &[Tool], verbosity: Verbosity) -> Result<()> {
    let missing: Mutex<Vec<usize>> = Mutex::new(Vec::new());

    std::thread::scope(|s| {
        for (idx, tool) in tools.iter().enumerate() {
            let missing = &missing;
            s.spawn(move || {
                let result = probe(tool);
                if verbosity >= Verbosity::Heavy {
                    match &result {
                        Ok(output) => log::debug!(
                            "{} {} → {}",
                            tool.program,
                            tool.probe_args.join(" "),
                            first_line(output)
                        ),
                        Err(reason) => log::debug!(
                            "{} {} → error: {reason}",
                            tool.program,
                            tool.probe_args.join(" ")
                        ),
                    }
                }
                if result.is_err() {
                    missing
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .push(idx);
                }
            });
        }
    });

    let mut missing = missing.into_inner().unwrap_or_else(PoisonError::into_inner);
    if missing.is_empty() {
        log::debug!("preflight check passed: all required tools are available");
        return Ok(());
    }

    missing.sort_unstable();
    Err(Error::MissingTools(
        missing
            .into_iter()
            .map(|idx| tools[idx].program.to_string())
            .collect(),
    ))
}

/// Check the tools required by `workloads`.
pub fn check(workloads: &[Box<dyn Workload>], verbosity: Verbosity) -> Result<()> {
    check_tools(&required_tools(workloads), verbosity)
}
