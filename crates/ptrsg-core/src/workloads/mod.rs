//! All six workload implementations.

pub mod helpers;

pub mod compiled;
pub mod interpreted;

use crate::config::ChaosLevel;
use crate::workload::Workload;

/// All workload constructors, in enumeration order.
///
/// Queued runs execute in this order and preflight reports missing tools in
/// this order.
pub fn all_workloads() -> Vec<Box<dyn Workload>> {
    vec![
        // Interpreted
        Box::new(interpreted::LuaWorkload),
        Box::new(interpreted::PythonWorkload),
        Box::new(interpreted::NodeWorkload),
        // Compiled
        Box::new(compiled::GoWorkload),
        Box::new(compiled::CppWorkload),
        Box::new(compiled::RustWorkload),
    ]
}

/// Workloads that take part at the given chaos level.
pub fn select(chaos: ChaosLevel) -> Vec<Box<dyn Workload>> {
    all_workloads()
        .into_iter()
        .filter(|w| w.enabled_at(chaos))
        .collect()
}
