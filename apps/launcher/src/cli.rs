use crate::error::LauncherAppError;

use error_location::ErrorLocation;

use std::panic::Location;
use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

const APP_DIR_NAME: &str = "backend-launcher";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Parser)]
#[command(name = "backend-launcher")]
#[command(about = "Start the local backend unless it is already answering")]
#[command(version)]
pub struct Cli {
    /// Backend base URL (defaults to the configured host and port)
    #[arg(long)]
    pub url: Option<String>,

    /// Directory holding launcher.json
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// Directory for backend-launcher.log
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Log every probe and poll
    #[arg(long, short)]
    pub verbose: bool,
}

impl Cli {
    pub fn config_dir(&self) -> Result<PathBuf, LauncherAppError> {
        resolve_dir(self.config_dir.as_ref(), dirs::config_dir(), "config")
    }

    pub fn log_dir(&self) -> Result<PathBuf, LauncherAppError> {
        if let Some(dir) = &self.log_dir {
            return Ok(dir.clone());
        }

        resolve_dir(None, dirs::data_local_dir(), "log").map(|dir| dir.join(LOG_DIR_NAME))
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Trace
        } else {
            crate::logger::DEFAULT_LOG_LEVEL
        }
    }
}

fn resolve_dir(
    explicit: Option<&PathBuf>,
    platform_dir: Option<PathBuf>,
    kind: &str,
) -> Result<PathBuf, LauncherAppError> {
    if let Some(dir) = explicit {
        return Ok(dir.clone());
    }

    platform_dir
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| missing_dir(kind))
}

#[track_caller]
fn missing_dir(kind: &str) -> LauncherAppError {
    LauncherAppError::App {
        message: format!("No platform {kind} directory; pass --{kind}-dir"),
        location: ErrorLocation::from(Location::caller()),
    }
}
