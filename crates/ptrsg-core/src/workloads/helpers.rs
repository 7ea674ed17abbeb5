//! Shared process helpers used by preflight, the build step and the scheduler.
//!
//! Keeps stdio wiring and argv formatting in one place so that verbosity only
//! ever changes where child output goes, never what gets run.

use std::process::{Command, Output, Stdio};

use crate::config::Verbosity;
use crate::workload::Tool;

// ---------------------------------------------------------------------------
// Stdio
// ---------------------------------------------------------------------------

/// Stdio for a child's stdout/stderr: passed through at heavy verbosity,
/// discarded otherwise.
pub fn child_stdio(verbosity: Verbosity) -> Stdio {
    if verbosity.streams_child_output() {
        Stdio::inherit()
    } else {
        Stdio::null()
    }
}

/// Wire a command's stdio for a timed or build run. Stdin is always closed.
pub fn configure_stdio(cmd: &mut Command, verbosity: Verbosity) {
    cmd.stdin(Stdio::null())
        .stdout(child_stdio(verbosity))
        .stderr(child_stdio(verbosity));
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Render a command as `[program arg1 arg2 ...]` for debug logs.
pub fn describe(cmd: &Command) -> String {
    let mut parts = vec![cmd.get_program().to_string_lossy().into_owned()];
    parts.extend(cmd.get_args().map(|a| a.to_string_lossy().into_owned()));
    format!("[{}]", parts.join(" "))
}

/// First non-empty line of a probe's combined output.
pub fn first_line(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    stdout
        .lines()
        .chain(stderr.lines())
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or_default()
        .to_string()
}

// ---------------------------------------------------------------------------
// Tool probing
// ---------------------------------------------------------------------------

/// Run a tool with its probe arguments and return its output if it exits 0.
///
/// Returns `Err` with a short reason when the tool cannot be spawned or
/// exits unsuccessfully.
pub fn probe(tool: &Tool) -> Result<Output, String> {
    let output = Command::new(tool.program)
        .args(tool.probe_args)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| e.to_string())?;

    if !output.status.success() {
        return Err(output.status.to_string());
    }

    Ok(output)
}

/// Check if a tool is invocable.
pub fn tool_exists(tool: &Tool) -> bool {
    probe(tool).is_ok()
}
