use crate::config::LauncherConfig;
use crate::error::launcher::LauncherError;

use models::ServeOptions;

use error_location::ErrorLocation;

use std::env::consts::EXE_SUFFIX;
use std::env::current_exe;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::{debug, info};

const HOST_FLAG: &str = "--host";
const PORT_FLAG: &str = "--port";
const LOG_LEVEL_FLAG: &str = "--log-level";
const NO_ACCESS_LOG_FLAG: &str = "--no-access-log";
const BACKEND_DIR_NAME: &str = "backend";

/// Body of the launcher thread.
///
/// `run` should block for as long as the backend serves: the launcher treats
/// a live thread as a backend that is still coming up.
pub trait BackendRunner: Send + Sync {
    fn run(&self, options: &ServeOptions) -> Result<(), LauncherError>;
}

impl<F> BackendRunner for F
where
    F: Fn(&ServeOptions) -> Result<(), LauncherError> + Send + Sync,
{
    fn run(&self, options: &ServeOptions) -> Result<(), LauncherError> {
        self(options)
    }
}

/// Runs the backend as a child process and waits on it.
///
/// The child is not tied to the host's lifetime; if the host exits first the
/// backend keeps serving until stopped externally.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    binary_name: String,
    executable: Option<PathBuf>,
}

impl ProcessRunner {
    pub fn new(binary_name: impl Into<String>) -> Self {
        Self {
            binary_name: binary_name.into(),
            executable: None,
        }
    }

    /// Use this executable instead of searching for `binary_name`.
    pub fn with_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.executable = Some(path.into());
        self
    }

    pub fn from_config(config: &LauncherConfig) -> Self {
        let runner = Self::new(config.backend_binary.as_str());
        match &config.backend_path {
            Some(path) => runner.with_executable(path),
            None => runner,
        }
    }

    /// Pick the executable to start.
    ///
    /// Search order:
    /// 1. Explicit executable
    /// 2. `backend/<binary>` next to the current executable
    /// 3. `<binary>` next to the current executable
    /// 4. `<binary>` on PATH
    pub(crate) fn resolve_executable(&self) -> PathBuf {
        if let Some(path) = &self.executable {
            return path.clone();
        }

        let file_name = format!("{}{EXE_SUFFIX}", self.binary_name);

        if let Ok(exe) = current_exe()
            && let Some(exe_dir) = exe.parent()
        {
            for candidate in [
                exe_dir.join(BACKEND_DIR_NAME).join(&file_name),
                exe_dir.join(&file_name),
            ] {
                if candidate.is_file() {
                    debug!("Using backend executable {}", candidate.display());
                    return candidate;
                }
            }
        }

        debug!("{} not found next to executable, using PATH", self.binary_name);
        PathBuf::from(&self.binary_name)
    }
}

pub(crate) fn build_serve_command(program: &Path, options: &ServeOptions) -> Command {
    let mut cmd = Command::new(program);
    cmd.arg(HOST_FLAG)
        .arg(&options.host)
        .arg(PORT_FLAG)
        .arg(options.port.to_string())
        .arg(LOG_LEVEL_FLAG)
        .arg(options.log_level.as_str());

    if !options.access_log {
        cmd.arg(NO_ACCESS_LOG_FLAG);
    }

    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    cmd
}

impl BackendRunner for ProcessRunner {
    fn run(&self, options: &ServeOptions) -> Result<(), LauncherError> {
        let program = self.resolve_executable();

        let mut child = build_serve_command(&program, options)
            .spawn()
            .map_err(|e| LauncherError::Spawn {
                message: format!("Failed to spawn backend {}: {e}", program.display()),
                location: ErrorLocation::from(Location::caller()),
                source: Box::new(e),
            })?;

        info!(
            "Backend {} started on {} (PID: {})",
            program.display(),
            options.base_url(),
            child.id()
        );

        let status = child.wait().map_err(|e| LauncherError::Spawn {
            message: format!("Failed to wait on backend {}: {e}", program.display()),
            location: ErrorLocation::from(Location::caller()),
            source: Box::new(e),
        })?;

        if status.success() {
            info!("Backend {} exited", program.display());
            return Ok(());
        }

        Err(LauncherError::Backend {
            message: format!("Backend {} exited with {status}", program.display()),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
