//! Logging for the launcher binary.
//!
//! Colored stdout plus a plain log file. The launcher library only uses the
//! `log` facade; this is where records actually go.

use crate::error::LauncherAppError;

use error_location::ErrorLocation;

use std::fmt::{Arguments, Display};
use std::io::stdout;
use std::panic::Location;
use std::path::Path;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use fern::colors::Color::{Blue, Green, Magenta, Red, Yellow};
use fern::colors::ColoredLevelConfig;
use fern::{Dispatch, FormatCallback};
use humantime::format_rfc3339;
use log::{LevelFilter, Record, info, warn};

static INIT_LOGGER_ONCE: Once = Once::new();
static LOGGER_ALREADY_CALLED: AtomicBool = AtomicBool::new(false);

const LOG_FILE_NAME: &str = "backend-launcher.log";

#[cfg(debug_assertions)]
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

#[cfg(not(debug_assertions))]
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Initialize the logger with stdout and `{log_dir}/backend-launcher.log`.
///
/// Only the first call installs a logger. Later calls log a warning and
/// return Ok, whatever directory or level they pass.
///
/// # Errors
///
/// Returns [`LauncherAppError::App`] if the log directory or file cannot be
/// created, or another global logger is already installed.
pub fn initialize(log_dir: &Path, level: LevelFilter) -> Result<(), LauncherAppError> {
    if LOGGER_ALREADY_CALLED.swap(true, Ordering::SeqCst) {
        warn!("Logger already initialized");
        return Ok(());
    }

    let mut result = Ok(());

    INIT_LOGGER_ONCE.call_once(|| {
        result = install(log_dir, level);
        if result.is_ok() {
            info!("Logger initialized with level: {level:?}");
        }
    });

    result
}

fn format_line(
    out: FormatCallback,
    message: &Arguments,
    record: &Record,
    level: &dyn Display,
) {
    out.finish(format_args!(
        "[{date} - {level}] {message} [{file}:{line}]",
        date = format_rfc3339(SystemTime::now()),
        file = record.file().unwrap_or("unknown"),
        line = record.line().unwrap_or(0),
    ))
}

#[track_caller]
pub(crate) fn install(log_dir: &Path, level: LevelFilter) -> Result<(), LauncherAppError> {
    std::fs::create_dir_all(log_dir).map_err(|e| LauncherAppError::App {
        message: format!("Failed to create log directory {}: {e}", log_dir.display()),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let log_file =
        fern::log_file(log_dir.join(LOG_FILE_NAME)).map_err(|e| LauncherAppError::App {
            message: format!("Failed to create log file: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let colors = ColoredLevelConfig::new()
        .debug(Blue)
        .info(Green)
        .warn(Yellow)
        .error(Red)
        .trace(Magenta);

    let stdout_dispatch = Dispatch::new()
        .format(move |out, message, record| {
            format_line(out, message, record, &colors.color(record.level()))
        })
        .chain(stdout());

    let file_dispatch = Dispatch::new()
        .format(|out, message, record| format_line(out, message, record, &record.level()))
        .chain(log_file);

    Dispatch::new()
        .level(level)
        .chain(stdout_dispatch)
        .chain(file_dispatch)
        .apply()
        .map_err(|e| LauncherAppError::App {
            message: format!("Failed to initialize logger: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })
}
