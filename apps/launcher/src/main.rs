use backend_launcher::cli::Cli;
use backend_launcher::logger::initialize as LoggerInitialize;
use backend_launcher::run;

use std::process::ExitCode;

use clap::Parser;
use log::{error, warn};
use models::LaunchOutcome;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let logger = cli
        .log_dir()
        .and_then(|log_dir| LoggerInitialize(&log_dir, cli.log_level()));
    if let Err(e) = logger {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(outcome) if outcome.is_healthy() || outcome == LaunchOutcome::Unmanaged => {
            ExitCode::SUCCESS
        }
        Ok(outcome) => {
            warn!("Backend not confirmed healthy: {outcome}");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
