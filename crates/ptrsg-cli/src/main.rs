//! CLI for ptrsg: seeds from the scheduling noise of six language runtimes.

mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ptrsg")]
#[command(about = "ptrsg: turn runtime timing jitter into a seed")]
#[command(version = ptrsg_core::VERSION)]
struct Cli {
    /// Diagnostic output: none (seed only), lite (progress and timings),
    /// heavy (everything, including child output). Bare --verbose means heavy.
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        default_value = "none",
        default_missing_value = "heavy",
        value_parser = ["none", "lite", "heavy"]
    )]
    verbose: String,

    /// Run workloads one at a time instead of all at once
    #[arg(long, global = true)]
    queue: bool,

    /// Language set: low (lua, python, node, go) or high (adds cpp and rust)
    #[arg(long, global = true, default_value = "high", value_parser = ["low", "high"])]
    chaos: String,

    /// Seed length in bits (1-512)
    #[arg(short = 'S', long, global = true, default_value = "512", allow_negative_numbers = true)]
    seed_bits: i64,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the workloads for the chosen chaos level and whether their tools are installed
    Scan,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match commands::run_config(&cli.verbose, cli.queue, &cli.chaos, cli.seed_bits) {
        Ok(config) => config,
        Err(e) => return commands::fail(&e),
    };
    commands::init_logging(config.verbosity);

    let result = match cli.command {
        Some(Commands::Scan) => {
            commands::scan::run(config.chaos);
            Ok(())
        }
        None => commands::generate::run(config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => commands::fail(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["ptrsg"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.verbose, "none");
        assert!(!cli.queue);
        assert_eq!(cli.chaos, "high");
        assert_eq!(cli.seed_bits, 512);
        assert!(cli.command.is_none());
    }

    #[test]
    fn bare_verbose_is_heavy() {
        assert_eq!(parse(&["--verbose"]).verbose, "heavy");
        assert_eq!(parse(&["--verbose", "lite"]).verbose, "lite");
        assert_eq!(parse(&["--verbose=none"]).verbose, "none");
    }

    #[test]
    fn bare_verbose_before_another_flag() {
        let cli = parse(&["--verbose", "--queue"]);
        assert_eq!(cli.verbose, "heavy");
        assert!(cli.queue);
    }

    #[test]
    fn short_and_long_seed_bits() {
        assert_eq!(parse(&["-S", "128"]).seed_bits, 128);
        assert_eq!(parse(&["--seed-bits", "7"]).seed_bits, 7);
        assert_eq!(parse(&["-S", "0"]).seed_bits, 0);
        assert_eq!(parse(&["-S", "-3"]).seed_bits, -3);
    }

    #[test]
    fn unknown_values_are_usage_errors() {
        assert!(Cli::try_parse_from(["ptrsg", "--chaos", "medium"]).is_err());
        assert!(Cli::try_parse_from(["ptrsg", "--verbose", "loud"]).is_err());
        assert!(Cli::try_parse_from(["ptrsg", "-S", "many"]).is_err());
    }

    #[test]
    fn seed_bits_accepted_after_scan() {
        let cli = parse(&["scan", "-S", "8"]);
        assert!(matches!(cli.command, Some(Commands::Scan)));
        assert_eq!(cli.seed_bits, 8);
    }

    #[test]
    fn scan_subcommand_accepts_chaos() {
        let cli = parse(&["scan", "--chaos", "low"]);
        assert!(matches!(cli.command, Some(Commands::Scan)));
        assert_eq!(cli.chaos, "low");
    }
}
