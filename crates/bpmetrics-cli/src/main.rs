//! Entry point of the `bpmetrics` binary.

use std::{process::ExitCode, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use bpmetrics_cli::{
    Args,
    error_adapter::{render, to_reportables},
};

/// Install `env_logger` at the requested level, `warn` if it is unknown.
fn init_logging(level: &str) {
    let filter = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Unknown log level `{level}`, falling back to `warn`");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(filter)
        .init();
}

fn main() -> ExitCode {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logging(&args.log_level);
    debug!(args:?; "Parsed arguments");

    match bpmetrics_cli::run(&args) {
        Ok(()) => {
            info!(output = args.output; "Done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            for report in render(&to_reportables(&err)) {
                error!("{report}");
            }
            ExitCode::FAILURE
        }
    }
}
