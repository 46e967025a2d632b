use launcher_core::config::LauncherConfig;
use launcher_core::error::launcher::LauncherError;
use launcher_core::launcher::BackendLauncher;

use models::ServeOptions;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread::{park, sleep};
use std::time::Duration;

pub const MANAGED_URL: &str = "http://127.0.0.1:8000";

/// Fast timings so timeout paths finish in well under a second.
pub fn fast_config() -> LauncherConfig {
    LauncherConfig {
        probe_timeout_ms: 50,
        poll_interval_ms: 10,
        startup_deadline_ms: 300,
        ..LauncherConfig::default()
    }
}

/// What the backend stub does once its runner is invoked.
#[derive(Clone, Copy)]
pub enum RunnerBehavior {
    /// Become healthy after the delay, then keep serving.
    ServeAfter(Duration),
    /// Never become healthy, keep the thread alive.
    Hang,
    /// Exit immediately with an error.
    Fail,
}

/// Shared counters between a launcher under test and its stub probe/runner.
#[derive(Clone, Default)]
pub struct StubBackend {
    pub healthy: Arc<AtomicBool>,
    pub probes: Arc<AtomicUsize>,
    pub launches: Arc<AtomicUsize>,
}

impl StubBackend {
    pub fn already_running() -> Self {
        let stub = Self::default();
        stub.healthy.store(true, Ordering::SeqCst);
        stub
    }

    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }

    pub fn launch_count(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }

    pub fn launcher(&self, config: LauncherConfig, behavior: RunnerBehavior) -> BackendLauncher {
        let healthy = Arc::clone(&self.healthy);
        let probes = Arc::clone(&self.probes);
        let probe = move |_health_url: &str| {
            probes.fetch_add(1, Ordering::SeqCst);
            healthy.load(Ordering::SeqCst)
        };

        let healthy = Arc::clone(&self.healthy);
        let launches = Arc::clone(&self.launches);
        let runner = move |_options: &ServeOptions| -> Result<(), LauncherError> {
            launches.fetch_add(1, Ordering::SeqCst);
            match behavior {
                RunnerBehavior::ServeAfter(delay) => {
                    sleep(delay);
                    healthy.store(true, Ordering::SeqCst);
                    hang()
                }
                RunnerBehavior::Hang => hang(),
                RunnerBehavior::Fail => Err(LauncherError::Backend {
                    message: String::from("stub backend refused to start"),
                    location: error_location::ErrorLocation::from(
                        std::panic::Location::caller(),
                    ),
                }),
            }
        };

        BackendLauncher::new(config, probe, runner).expect("test config is valid")
    }
}

fn hang() -> ! {
    loop {
        park();
    }
}
