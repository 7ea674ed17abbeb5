//! Interpreted workloads: the source file is handed straight to the runtime.
//!
//! Interpreter start-up dominates these timings, which is exactly the noise
//! we want: module loading, JIT warm-up and GC scheduling all vary per run.

use crate::config::ChaosLevel;
use crate::workload::{Tool, Toolchain, Workload, WorkloadInfo};

const LUA: Tool = Tool {
    program: "lua",
    probe_args: &["-v"],
};

const PYTHON: Tool = Tool {
    program: "python3",
    probe_args: &["--version"],
};

const NODE: Tool = Tool {
    program: "node",
    probe_args: &["--version"],
};

// ---------------------------------------------------------------------------
// Lua
// ---------------------------------------------------------------------------

pub struct LuaWorkload;

static LUA_INFO: WorkloadInfo = WorkloadInfo {
    name: "lua",
    description: "Lua table of i ++ i strings, sorted with table.sort",
    extension: "lua",
    toolchain: Toolchain::Interpreter(LUA),
    min_chaos: ChaosLevel::Low,
    payload: r#"local t = {}
for i = 1, 100000 do
    t[i] = tostring(i) .. i
end
table.sort(t)
"#,
};

impl Workload for LuaWorkload {
    fn info(&self) -> &WorkloadInfo {
        &LUA_INFO
    }
}

// ---------------------------------------------------------------------------
// Python
// ---------------------------------------------------------------------------

pub struct PythonWorkload;

static PYTHON_INFO: WorkloadInfo = WorkloadInfo {
    name: "python",
    description: "Python list comprehension of i ++ i*i strings, sorted in place",
    extension: "py",
    toolchain: Toolchain::Interpreter(PYTHON),
    min_chaos: ChaosLevel::Low,
    payload: r#"lst = [str(i) + str(i*i) for i in range(100000)]
lst.sort()
"#,
};

impl Workload for PythonWorkload {
    fn info(&self) -> &WorkloadInfo {
        &PYTHON_INFO
    }
}

// ---------------------------------------------------------------------------
// Node.js
// ---------------------------------------------------------------------------

pub struct NodeWorkload;

static NODE_INFO: WorkloadInfo = WorkloadInfo {
    name: "node",
    description: "Node.js Array.from of i ++ i*i strings, sorted with Array.sort",
    extension: "js",
    toolchain: Toolchain::Interpreter(NODE),
    min_chaos: ChaosLevel::Low,
    payload: r#"let arr = Array.from({length: 100000}, (_, i) => '' + i + (i*i));
arr.sort();
"#,
};

impl Workload for NodeWorkload {
    fn info(&self) -> &WorkloadInfo {
        &NODE_INFO
    }
}
