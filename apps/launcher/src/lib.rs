// Library exports for testing
// The binary (main.rs) imports these as well

pub mod cli;
pub mod error;
pub mod logger;

#[cfg(test)]
mod tests;

use crate::cli::Cli;
use crate::error::LauncherAppError;

use launcher_core::config::LauncherConfig;
use launcher_core::launcher::BackendLauncher;

use models::LaunchOutcome;

use error_location::ErrorLocation;

use std::panic::Location;

use log::info;

/// Load config, build a launcher and ensure the backend once.
pub fn run(cli: &Cli) -> Result<LaunchOutcome, LauncherAppError> {
    let config_dir = cli.config_dir()?;
    let config = LauncherConfig::load(&config_dir).map_err(|e| LauncherAppError::Core {
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let target = cli.url.clone().unwrap_or_else(|| config.base_url());

    let launcher = BackendLauncher::from_config(config).map_err(|e| LauncherAppError::Core {
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })?;

    info!("Ensuring backend at {target}");
    let outcome = launcher.ensure_started(&target);
    info!("Backend {target}: {outcome}");

    Ok(outcome)
}
