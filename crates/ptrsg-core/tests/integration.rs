//! Integration tests for ptrsg-core.
//!
//! These tests drive the public pipeline end to end:
//! workload registry → preflight → provision → build → schedule → seed.
//! Mock workloads run under `sh`; runs against the real toolchains are
//! ignored by default.

use std::ffi::OsString;
use std::path::Path;

use num_bigint::BigUint;
use ptrsg_core::{
    ChaosLevel, Error, RunConfig, Schedule, SeedBits, SeedGenerator, Tool, Toolchain, Verbosity,
    Workload, WorkloadInfo, extract, workloads,
};

const SH: Tool = Tool {
    program: "sh",
    probe_args: &["-c", "exit 0"],
};

/// `sh` script that burns a little CPU.
struct Spin(WorkloadInfo);

impl Spin {
    fn new(name: &'static str) -> Self {
        Self(WorkloadInfo {
            name,
            description: "busy loop",
            extension: name,
            toolchain: Toolchain::Interpreter(SH),
            min_chaos: ChaosLevel::Low,
            payload: "i=0\nwhile [ $i -lt 500 ]; do i=$((i+1)); done\n",
        })
    }
}

impl Workload for Spin {
    fn info(&self) -> &WorkloadInfo {
        &self.0
    }
}

/// `sh` "compiler" that copies the payload and marks it executable.
struct Copied(WorkloadInfo);

impl Workload for Copied {
    fn info(&self) -> &WorkloadInfo {
        &self.0
    }

    fn compile_args(&self, source: &Path, executable: &Path) -> Vec<OsString> {
        vec![
            "-c".into(),
            r#"cp "$0" "$1" && chmod +x "$1""#.into(),
            source.as_os_str().to_owned(),
            executable.as_os_str().to_owned(),
        ]
    }
}

fn fleet() -> Vec<Box<dyn Workload>> {
    vec![
        Box::new(Spin::new("one")),
        Box::new(Spin::new("two")),
        Box::new(Copied(WorkloadInfo {
            name: "three",
            description: "copied script",
            extension: "three",
            toolchain: Toolchain::Compiler(SH),
            min_chaos: ChaosLevel::Low,
            payload: "#!/bin/sh\nexit 0\n",
        })),
    ]
}

fn config(schedule: Schedule, bits: u16) -> RunConfig {
    RunConfig {
        verbosity: Verbosity::None,
        schedule,
        chaos: ChaosLevel::High,
        seed_bits: SeedBits::new(bits).unwrap(),
    }
}

#[test]
fn registry_matches_chaos_levels() {
    let low: Vec<_> = workloads::select(ChaosLevel::Low)
        .iter()
        .map(|w| w.name())
        .collect();
    let high: Vec<_> = workloads::select(ChaosLevel::High)
        .iter()
        .map(|w| w.name())
        .collect();
    assert_eq!(low, ["lua", "python", "node", "go"]);
    assert_eq!(high, ["lua", "python", "node", "go", "cpp", "rust"]);
}

#[test]
fn mock_fleet_parallel_end_to_end() {
    let report = SeedGenerator::with_workloads(config(Schedule::Parallel, 96), fleet())
        .run()
        .unwrap();
    assert_eq!(
        report.timings.languages().collect::<Vec<_>>(),
        ["one", "three", "two"]
    );
    assert!(report.seed().value().bits() <= 96);
    assert_eq!(
        &extract(&report.timings, SeedBits::new(96).unwrap()),
        &report.extraction
    );
}

#[test]
fn mock_fleet_queued_end_to_end() {
    let report = SeedGenerator::with_workloads(config(Schedule::Queued, 512), fleet())
        .run()
        .unwrap();
    assert_eq!(report.timings.len(), 3);
    assert_eq!(report.extraction.buffer.len(), 3 * 8);
    assert_eq!(
        report.seed().value(),
        &BigUint::from_bytes_be(&report.extraction.digest)
    );
}

#[test]
fn out_of_range_widths_are_rejected_up_front() {
    assert!(matches!(SeedBits::new(0), Err(Error::InvalidConfig(_))));
    assert!(matches!(SeedBits::new(513), Err(Error::InvalidConfig(_))));
}

#[test]
fn missing_tool_blocks_the_run() {
    struct Absent(WorkloadInfo);
    impl Workload for Absent {
        fn info(&self) -> &WorkloadInfo {
            &self.0
        }
    }

    let mut fleet = fleet();
    fleet.push(Box::new(Absent(WorkloadInfo {
        name: "absent",
        description: "interpreter that is not installed",
        extension: "absent",
        toolchain: Toolchain::Interpreter(Tool {
            program: "ptrsg-integration-missing",
            probe_args: &["--version"],
        }),
        min_chaos: ChaosLevel::Low,
        payload: "",
    })));

    let err = SeedGenerator::with_workloads(config(Schedule::Parallel, 512), fleet)
        .run()
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "preflight check failed: ptrsg-integration-missing missing"
    );
}

#[test]
fn interrupted_generator_yields_no_seed() {
    let generator = SeedGenerator::with_workloads(config(Schedule::Queued, 128), fleet());
    generator
        .interrupt_flag()
        .store(true, std::sync::atomic::Ordering::SeqCst);
    let err = generator.run().unwrap_err();
    assert!(matches!(err, Error::Interrupted), "{err}");
    assert_eq!(err.to_string(), "run interrupted");
}

#[test]
#[ignore] // Run with: cargo test -- --ignored (needs lua, python3, node, go)
fn low_chaos_real_toolchains() {
    let generator = SeedGenerator::new(RunConfig {
        chaos: ChaosLevel::Low,
        seed_bits: SeedBits::new(128).unwrap(),
        ..RunConfig::default()
    });
    let report = generator.run().unwrap();
    assert_eq!(
        report.timings.languages().collect::<Vec<_>>(),
        ["go", "lua", "node", "python"]
    );
    assert!(report.timings.iter().all(|(_, ns)| ns > 0));
    assert!(report.seed().value().bits() <= 128);
}

#[test]
#[ignore] // Run with: cargo test -- --ignored (needs every toolchain)
fn high_chaos_real_toolchains_differ_between_runs() {
    let generator = SeedGenerator::new(RunConfig::default());
    let a = generator.run().unwrap();
    let b = generator.run().unwrap();
    assert_eq!(a.timings.len(), 6);
    // Wall-clock jitter makes identical timing sets vanishingly unlikely.
    assert_ne!(a.seed(), b.seed());
}
