//! Generate a 256-bit seed from the low-chaos workload set.
//!
//! Needs lua, python3, node and go on `PATH`.
//!
//! Run: `cargo run --example generate`

use ptrsg_core::{ChaosLevel, RunConfig, Schedule, SeedBits, SeedGenerator};

fn main() -> ptrsg_core::Result<()> {
    let config = RunConfig {
        chaos: ChaosLevel::Low,
        schedule: Schedule::Queued,
        seed_bits: SeedBits::new(256)?,
        ..RunConfig::default()
    };

    let generator = SeedGenerator::new(config);
    println!("Workloads: {}", generator.workload_count());

    let report = generator.run()?;
    for (language, nanos) in report.timings.iter() {
        println!("  {language:<8} {nanos:>12} ns");
    }
    println!("Digest:  {}", report.extraction.digest_hex());
    println!("Seed:    {}", report.seed());
    Ok(())
}
