use ptrsg_core::{RunConfig, RunDir, SeedGenerator, SeedReport, Timings, Verbosity};

pub fn run(config: RunConfig) -> ptrsg_core::Result<()> {
    let generator = SeedGenerator::new(config);
    super::install_interrupt_handler(generator.interrupt_flag());
    execute(&generator, &mut |line: String| println!("{line}"))
}

/// Drive one run, handing each output line to `emit`. The banner only
/// appears once preflight has passed.
fn execute(generator: &SeedGenerator, emit: &mut dyn FnMut(String)) -> ptrsg_core::Result<()> {
    let config = generator.config();
    let chatty = config.verbosity >= Verbosity::Lite;

    generator.preflight()?;
    if chatty {
        emit(format!("PTRSG {}", ptrsg_core::VERSION));
        emit(format!(
            "Using chaos={}, queue={}",
            config.chaos,
            config.schedule.is_queued()
        ));
    }

    let run_dir = RunDir::new()?;
    let report = generator.run_in(&run_dir)?;

    if chatty {
        emit(timings_table(&report.timings));
    }
    emit(seed_line(&report));
    Ok(())
}

fn timings_table(timings: &Timings) -> String {
    let mut out = String::from("Timings (ns):");
    for (language, nanos) in timings.iter() {
        out.push_str(&format!("\n  {language}: {nanos}"));
    }
    out
}

fn seed_line(report: &SeedReport) -> String {
    let seed = report.seed();
    format!("Seed generated ({}-bit): {seed}", seed.bits().get())
}
