//! Mock workloads backed by `sh`, so pipeline stages can be exercised without
//! any language toolchain installed.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ChaosLevel;
use crate::workload::{Artifact, Tool, Toolchain, Workload, WorkloadInfo};

pub const SH: Tool = Tool {
    program: "sh",
    probe_args: &["-c", "exit 0"],
};

pub const NO_SUCH_TOOL: Tool = Tool {
    program: "ptrsg-no-such-tool",
    probe_args: &["--version"],
};

/// "Compiles" by copying the source to the executable path and marking it
/// executable. `$0` is the source, `$1` the executable.
const COPY_AND_CHMOD: &str = r#"cp "$0" "$1" && chmod +x "$1""#;

/// A deterministic workload whose payload is a shell script.
pub struct ShellWorkload {
    info: WorkloadInfo,
    compile: Option<&'static str>,
}

impl ShellWorkload {
    /// Interpreted by `sh`. The name doubles as the file extension so that
    /// several mocks can share one run directory.
    pub fn script(name: &'static str, payload: &'static str) -> Self {
        Self {
            info: info(name, Toolchain::Interpreter(SH), payload),
            compile: None,
        }
    }

    /// "Compiled" by copying; `payload` must start with a `#!/bin/sh` line.
    pub fn compiled(name: &'static str, payload: &'static str) -> Self {
        Self {
            info: info(name, Toolchain::Compiler(SH), payload),
            compile: Some(COPY_AND_CHMOD),
        }
    }

    /// A compiled workload whose compiler always exits 1.
    pub fn broken_compiler(name: &'static str) -> Self {
        Self {
            info: info(name, Toolchain::Compiler(SH), "#!/bin/sh\n"),
            compile: Some("exit 1"),
        }
    }

    /// An interpreted workload whose interpreter does not exist.
    pub fn unlaunchable(name: &'static str) -> Self {
        Self {
            info: info(name, Toolchain::Interpreter(NO_SUCH_TOOL), ""),
            compile: None,
        }
    }

    /// A compiled workload whose compiler does not exist.
    pub fn missing_compiler(name: &'static str) -> Self {
        Self {
            info: info(name, Toolchain::Compiler(NO_SUCH_TOOL), ""),
            compile: None,
        }
    }

    pub fn at_chaos(mut self, min_chaos: ChaosLevel) -> Self {
        self.info.min_chaos = min_chaos;
        self
    }
}

fn info(name: &'static str, toolchain: Toolchain, payload: &'static str) -> WorkloadInfo {
    WorkloadInfo {
        name,
        description: "mock shell workload",
        extension: name,
        toolchain,
        min_chaos: ChaosLevel::Low,
        payload,
    }
}

impl Workload for ShellWorkload {
    fn info(&self) -> &WorkloadInfo {
        &self.info
    }

    fn compile_args(&self, source: &Path, executable: &Path) -> Vec<OsString> {
        vec![
            "-c".into(),
            self.compile.unwrap_or("exit 1").into(),
            source.as_os_str().to_owned(),
            executable.as_os_str().to_owned(),
        ]
    }
}

/// Write `body` to `<dir>/<language>.sh` and wrap it as an `sh` script artifact.
pub fn script_artifact(dir: &Path, language: &'static str, body: &str) -> Artifact {
    let source: PathBuf = dir.join(format!("{language}.sh"));
    fs::write(&source, body).unwrap();
    Artifact::Script {
        language,
        interpreter: "sh",
        source,
    }
}
