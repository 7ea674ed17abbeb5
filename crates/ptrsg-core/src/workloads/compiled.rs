//! Compiled workloads: built once per run with optimisations off, then the
//! executable itself is timed.
//!
//! Only the execution is measured. Compile time varies far more than run
//! time but is not part of the timing record.

use std::ffi::OsString;
use std::path::Path;

use crate::config::ChaosLevel;
use crate::workload::{Tool, Toolchain, Workload, WorkloadInfo};

const GO: Tool = Tool {
    program: "go",
    probe_args: &["version"],
};

const GXX: Tool = Tool {
    program: "g++",
    probe_args: &["--version"],
};

const RUSTC: Tool = Tool {
    program: "rustc",
    probe_args: &["--version"],
};

// ---------------------------------------------------------------------------
// Go
// ---------------------------------------------------------------------------

pub struct GoWorkload;

static GO_INFO: WorkloadInfo = WorkloadInfo {
    name: "go",
    description: "Go slice of strconv.Itoa(i) ++ strconv.Itoa(i*i), sort.Strings",
    extension: "go",
    toolchain: Toolchain::Compiler(GO),
    min_chaos: ChaosLevel::Low,
    payload: r#"package main
import (
    "sort"
    "strconv"
)
func main() {
    s := make([]string, 100000)
    for i := 0; i < 100000; i++ {
        s[i] = strconv.Itoa(i) + strconv.Itoa(i*i)
    }
    sort.Strings(s)
}
"#,
};

impl Workload for GoWorkload {
    fn info(&self) -> &WorkloadInfo {
        &GO_INFO
    }

    fn compile_args(&self, source: &Path, executable: &Path) -> Vec<OsString> {
        vec![
            "build".into(),
            "-o".into(),
            executable.as_os_str().to_owned(),
            source.as_os_str().to_owned(),
        ]
    }
}

// ---------------------------------------------------------------------------
// C++
// ---------------------------------------------------------------------------

pub struct CppWorkload;

static CPP_INFO: WorkloadInfo = WorkloadInfo {
    name: "cpp",
    description: "C++ std::vector<std::string> built via ostringstream, std::sort",
    extension: "cpp",
    toolchain: Toolchain::Compiler(GXX),
    min_chaos: ChaosLevel::High,
    payload: r#"#include <iostream>
#include <vector>
#include <string>
#include <algorithm>
#include <sstream>
int main() {
    std::vector<std::string> v;
    v.reserve(100000);
    for (int i = 0; i < 100000; ++i) {
        std::ostringstream oss;
        oss << i << i*i;
        v.push_back(oss.str());
    }
    std::sort(v.begin(), v.end());
    return 0;
}
"#,
};

impl Workload for CppWorkload {
    fn info(&self) -> &WorkloadInfo {
        &CPP_INFO
    }

    fn compile_args(&self, source: &Path, executable: &Path) -> Vec<OsString> {
        vec![
            "-O0".into(),
            source.as_os_str().to_owned(),
            "-o".into(),
            executable.as_os_str().to_owned(),
        ]
    }
}

// ---------------------------------------------------------------------------
// Rust
// ---------------------------------------------------------------------------

pub struct RustWorkload;

static RUST_INFO: WorkloadInfo = WorkloadInfo {
    name: "rust",
    description: "Rust Vec<String> of format!(\"{i}{i*i}\"), Vec::sort",
    extension: "rs",
    toolchain: Toolchain::Compiler(RUSTC),
    min_chaos: ChaosLevel::High,
    payload: r#"fn main() {
    let mut v: Vec<String> = (0u64..100_000)
        .map(|i| format!("{}{}", i, i * i))
        .collect();
    v.sort();
}
"#,
};

impl Workload for RustWorkload {
    fn info(&self) -> &WorkloadInfo {
        &RUST_INFO
    }

    fn compile_args(&self, source: &Path, executable: &Path) -> Vec<OsString> {
        vec![
            "-C".into(),
            "opt-level=0".into(),
            source.as_os_str().to_owned(),
            "-o".into(),
            executable.as_os_str().to_owned(),
        ]
    }
}
