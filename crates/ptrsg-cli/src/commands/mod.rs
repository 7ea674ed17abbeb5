pub mod generate;
pub mod scan;

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{Level, LevelFilter};
use ptrsg_core::{ChaosLevel, Error, RunConfig, Schedule, SeedBits, Verbosity};

/// Turn raw flag values into a validated [`RunConfig`].
pub fn run_config(verbose: &str, queue: bool, chaos: &str, seed_bits: i64) -> ptrsg_core::Result<RunConfig> {
    Ok(RunConfig {
        verbosity: verbose.parse::<Verbosity>()?,
        schedule: Schedule::from_queue_flag(queue),
        chaos: chaos.parse::<ChaosLevel>()?,
        seed_bits: parse_seed_bits(seed_bits)?,
    })
}

fn parse_seed_bits(bits: i64) -> ptrsg_core::Result<SeedBits> {
    match u16::try_from(bits) {
        Ok(bits) => SeedBits::new(bits),
        Err(_) => Err(Error::InvalidConfig(format!(
            "seed length must be {}-{} bits, got {bits}",
            SeedBits::MIN,
            SeedBits::MAX
        ))),
    }
}

/// Log level for each verbosity. `RUST_LOG` still overrides it.
pub fn level_filter(verbosity: Verbosity) -> LevelFilter {
    match verbosity {
        Verbosity::None => LevelFilter::Warn,
        Verbosity::Lite => LevelFilter::Info,
        Verbosity::Heavy => LevelFilter::Debug,
    }
}

/// Route library logs to stdout. Progress lines print bare; warnings and
/// errors keep their level as a prefix.
pub fn init_logging(verbosity: Verbosity) {
    env_logger::Builder::new()
        .filter_level(level_filter(verbosity))
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format(|buf, record| match record.level() {
            Level::Error | Level::Warn => {
                writeln!(buf, "{}: {}", record.level().as_str().to_lowercase(), record.args())
            }
            _ => writeln!(buf, "{}", record.args()),
        })
        .init();
}

/// Ctrl+C goes to the workload children too. The handler only raises
/// `interrupted`; the pipeline notices it, fails with an interrupted error
/// and removes its run directory on the way out.
pub fn install_interrupt_handler(interrupted: Arc<AtomicBool>) {
    if let Err(e) = ctrlc::set_handler(move || {
        interrupted.store(true, Ordering::SeqCst);
    }) {
        log::warn!("could not install Ctrl+C handler: {e}");
    }
}

/// Report a failed run and pick the exit status.
pub fn fail(err: &Error) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::FAILURE
}
