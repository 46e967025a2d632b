//! Start-once launcher for the local backend.
//!
//! [`ensure_backend_started`] makes sure the backend behind a base URL is
//! answering before a frontend starts talking to it:
//!
//! 1. Return at once if an earlier call already saw it healthy
//! 2. Ignore targets that are not the managed loopback host and port
//! 3. Probe once; a healthy backend is simply recorded as started
//! 4. Leave an earlier, still-running launcher thread alone
//! 5. Otherwise start the backend on a detached thread and poll until it
//!    answers, its runner fails, or the startup deadline passes
//!
//! Nothing is raised to the caller. A backend that never comes up surfaces
//! later as a connection error on first use.
//!
//! The probe uses `reqwest::blocking`: call from a plain thread, or from
//! `tokio::task::spawn_blocking` inside an async host.

pub mod health;
pub mod runner;
pub mod target;

use crate::config::LauncherConfig;
use crate::error::CoreError;
use crate::error::launcher::LauncherError;
use crate::launcher::health::{HealthProbe, HttpProbe, health_url};
use crate::launcher::runner::{BackendRunner, ProcessRunner};
use crate::launcher::target::is_managed_target;

use models::{LaunchOutcome, ServeOptions};

use error_location::ErrorLocation;

use std::panic::Location;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use std::thread::{Builder as ThreadBuilder, JoinHandle, sleep};

use backoff::{ExponentialBackoff, backoff::Backoff};
use log::{debug, error, info, trace, warn};

const WORKER_THREAD_NAME: &str = "embedded-backend";

static DEFAULT_LAUNCHER: OnceLock<BackendLauncher> = OnceLock::new();

/// The launcher thread and whether its runner reported an error.
struct Worker {
    handle: JoinHandle<()>,
    failed: Arc<AtomicBool>,
}

#[derive(Default)]
struct LauncherState {
    /// Set once a probe succeeded; never cleared.
    started: bool,
    worker: Option<Worker>,
}

impl LauncherState {
    fn worker_alive(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|worker| !worker.handle.is_finished())
    }
}

enum HealthWait {
    Healthy,
    RunnerFailed,
    DeadlinePassed,
}

/// Owns the started flag and the launcher thread for one managed backend.
///
/// Calls to [`ensure_started`](Self::ensure_started) are serialized on a
/// launch lock, so concurrent first calls queue behind each other and at most
/// one launcher thread is ever alive. The state itself is only locked for
/// short reads and writes, so [`is_started`](Self::is_started) and
/// [`is_launching`](Self::is_launching) never wait on a poll in progress.
pub struct BackendLauncher {
    config: LauncherConfig,
    serve_options: ServeOptions,
    probe: Box<dyn HealthProbe>,
    runner: Arc<dyn BackendRunner>,
    launch: Mutex<()>,
    state: Mutex<LauncherState>,
}

impl BackendLauncher {
    /// Create a launcher with explicit probe and runner.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] if `config` fails validation.
    pub fn new(
        config: LauncherConfig,
        probe: impl HealthProbe + 'static,
        runner: impl BackendRunner + 'static,
    ) -> Result<Self, CoreError> {
        config.validate()?;
        let serve_options = config.serve_options()?;

        Ok(Self::assemble(config, serve_options, probe, runner))
    }

    /// Create a launcher that probes over HTTP and runs the backend binary.
    pub fn from_config(config: LauncherConfig) -> Result<Self, CoreError> {
        let probe = HttpProbe::new(config.probe_timeout());
        let runner = ProcessRunner::from_config(&config);
        Self::new(config, probe, runner)
    }

    fn assemble(
        config: LauncherConfig,
        serve_options: ServeOptions,
        probe: impl HealthProbe + 'static,
        runner: impl BackendRunner + 'static,
    ) -> Self {
        Self {
            config,
            serve_options,
            probe: Box::new(probe),
            runner: Arc::new(runner),
            launch: Mutex::new(()),
            state: Mutex::new(LauncherState::default()),
        }
    }

    pub fn config(&self) -> &LauncherConfig {
        &self.config
    }

    /// True once any call has seen the backend healthy.
    pub fn is_started(&self) -> bool {
        self.lock_state().started
    }

    /// True while a launcher thread spawned by this launcher is still running.
    pub fn is_launching(&self) -> bool {
        self.lock_state().worker_alive()
    }

    /// Make sure the backend behind `target_url` is healthy, starting it if needed.
    ///
    /// Blocks for at most the startup deadline (plus one probe timeout) when a
    /// launch is needed; every other path returns after at most one probe.
    /// Polling stops early if the runner reports an error.
    ///
    /// # Returns
    ///
    /// The branch taken. Callers may ignore it; failures are never raised.
    pub fn ensure_started(&self, target_url: &str) -> LaunchOutcome {
        let _launch = self.launch.lock().unwrap_or_else(PoisonError::into_inner);

        if self.is_started() {
            trace!("Backend already confirmed healthy");
            return LaunchOutcome::AlreadyStarted;
        }

        if !is_managed_target(target_url, &self.config) {
            debug!("{target_url} is not the managed backend, leaving it alone");
            return LaunchOutcome::Unmanaged;
        }

        let health_url = health_url(target_url, &self.config.health_path);

        if self.probe.is_healthy(&health_url) {
            info!("Backend already running at {target_url}");
            self.lock_state().started = true;
            return LaunchOutcome::AlreadyRunning;
        }

        if self.is_launching() {
            debug!("Launcher thread still running, not spawning another");
            return LaunchOutcome::LaunchInProgress;
        }

        let worker = match self.spawn_worker() {
            Ok(worker) => worker,
            Err(e) => {
                error!("{e}");
                return LaunchOutcome::LaunchFailed;
            }
        };
        let failed = Arc::clone(&worker.failed);
        self.lock_state().worker = Some(worker);

        match self.wait_for_health(&health_url, &failed) {
            HealthWait::Healthy => {
                self.lock_state().started = true;
                LaunchOutcome::Launched
            }
            HealthWait::RunnerFailed => LaunchOutcome::LaunchFailed,
            HealthWait::DeadlinePassed => LaunchOutcome::TimedOut,
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, LauncherState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn spawn_worker(&self) -> Result<Worker, LauncherError> {
        let runner = Arc::clone(&self.runner);
        let options = self.serve_options.clone();
        let failed = Arc::new(AtomicBool::new(false));
        let failed_flag = Arc::clone(&failed);

        info!("Launching backend on {}", options.base_url());

        let handle = ThreadBuilder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || {
                if let Err(e) = runner.run(&options) {
                    error!("Backend runner failed: {e}");
                    failed_flag.store(true, Ordering::SeqCst);
                }
            })
            .map_err(|e| LauncherError::Spawn {
                message: format!("Failed to spawn {WORKER_THREAD_NAME} thread: {e}"),
                location: ErrorLocation::from(Location::caller()),
                source: Box::new(e),
            })?;

        Ok(Worker { handle, failed })
    }

    fn wait_for_health(&self, health_url: &str, runner_failed: &AtomicBool) -> HealthWait {
        let interval = self.config.poll_interval();
        let deadline = self.config.startup_deadline();

        // Fixed interval: no growth, no jitter, bounded by the deadline.
        let mut backoff = ExponentialBackoff {
            current_interval: interval,
            initial_interval: interval,
            randomization_factor: 0.0,
            multiplier: 1.0,
            max_interval: interval,
            max_elapsed_time: Some(deadline),
            ..Default::default()
        };
        backoff.reset();

        debug!("Waiting for backend health at {health_url}");

        loop {
            if self.probe.is_healthy(health_url) {
                info!("Backend is healthy at {health_url}");
                return HealthWait::Healthy;
            }

            // A runner that returned Ok may have handed the server off, so only errors stop polling.
            if runner_failed.load(Ordering::SeqCst) {
                warn!("Backend runner failed before {health_url} became healthy");
                return HealthWait::RunnerFailed;
            }

            match backoff.next_backoff() {
                Some(duration) => {
                    trace!("Backend not ready, retrying after {duration:?}");
                    sleep(duration);
                }
                None => {
                    warn!("Backend at {health_url} did not become healthy within {deadline:?}");
                    return HealthWait::DeadlinePassed;
                }
            }
        }
    }
}

/// The process-wide launcher, built from [`LauncherConfig::default`] on first use.
pub fn default_launcher() -> &'static BackendLauncher {
    DEFAULT_LAUNCHER.get_or_init(|| {
        let config = LauncherConfig::default();
        let serve_options = ServeOptions {
            host: config.host.clone(),
            port: config.port,
            log_level: config.log_level,
            access_log: config.access_log,
        };
        let probe = HttpProbe::new(config.probe_timeout());
        let runner = ProcessRunner::from_config(&config);
        BackendLauncher::assemble(config, serve_options, probe, runner)
    })
}

/// Ensure the local backend behind `target_url` is up before the caller proceeds.
///
/// Uses the process-wide [`default_launcher`]: host `127.0.0.1`, port 8000,
/// `/health` probed with a 1s timeout every 250ms for up to 10s.
pub fn ensure_backend_started(target_url: &str) -> LaunchOutcome {
    default_launcher().ensure_started(target_url)
}
