use launcher_core::config::LauncherConfig;
use launcher_core::error::launcher::LauncherError;
use launcher_core::launcher::BackendLauncher;
use launcher_core::launcher::health::HttpProbe;

use models::{LaunchOutcome, ServeOptions};

use error_location::ErrorLocation;

use std::future::pending;
use std::net::TcpListener;
use std::panic::Location;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::runtime::Builder as RuntimeBuilder;
use tokio::task::spawn_blocking;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Real HTTP probing against a real listener; the "backend" is a wiremock server
// ============================================================================

fn config_for_port(port: u16) -> LauncherConfig {
    LauncherConfig {
        port,
        probe_timeout_ms: 200,
        poll_interval_ms: 25,
        startup_deadline_ms: 5_000,
        ..LauncherConfig::default()
    }
}

/// Runner that serves `/health` on the pre-bound listener, the way an embedded backend would.
fn embedded_runner(
    listener: TcpListener,
    launches: &'static AtomicUsize,
) -> impl Fn(&ServeOptions) -> Result<(), LauncherError> + Send + Sync + 'static {
    let listener = Mutex::new(Some(listener));

    move |_options: &ServeOptions| -> Result<(), LauncherError> {
        launches.fetch_add(1, Ordering::SeqCst);

        let listener = listener
            .lock()
            .ok()
            .and_then(|mut slot| slot.take())
            .ok_or_else(|| LauncherError::Backend {
                message: String::from("listener already consumed"),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let runtime = RuntimeBuilder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| LauncherError::Spawn {
                message: format!("Failed to build runtime: {e}"),
                location: ErrorLocation::from(Location::caller()),
                source: Box::new(e),
            })?;

        runtime.block_on(async move {
            let server = MockServer::builder().listener(listener).start().await;
            Mock::given(method("GET"))
                .and(path("/health"))
                .respond_with(ResponseTemplate::new(200))
                .mount(&server)
                .await;
            pending::<()>().await;
        });

        Ok(())
    }
}

/// **VALUE**: Verifies the whole launch path over real sockets, not just the stubbed logic.
///
/// **WHY THIS MATTERS**: The stubbed tests prove the state machine; this proves the
/// production probe, URL derivation and polling cooperate with a backend that only starts
/// listening after the launcher thread runs.
///
/// **BUG THIS CATCHES**: Would catch the health URL pointing somewhere other than what the
/// backend serves, or the probe never retrying after the first refused connection.
#[test]
fn given_embedded_backend_when_ensure_started_called_then_launches_and_becomes_healthy() {
    // GIVEN: A reserved loopback port that only serves once the runner starts
    static LAUNCHES: AtomicUsize = AtomicUsize::new(0);
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let port = listener.local_addr().unwrap().port();
    let config = config_for_port(port);
    let probe = HttpProbe::new(config.probe_timeout());
    let launcher = BackendLauncher::new(config, probe, embedded_runner(listener, &LAUNCHES))
        .expect("valid config");

    // WHEN: Ensuring the backend is started
    let outcome = launcher.ensure_started(&format!("http://127.0.0.1:{port}"));

    // THEN: Launched once, healthy, and later calls are free
    assert_eq!(outcome, LaunchOutcome::Launched);
    assert_eq!(LAUNCHES.load(Ordering::SeqCst), 1);
    assert_eq!(
        launcher.ensure_started(&format!("http://localhost:{port}")),
        LaunchOutcome::AlreadyStarted
    );
}

/// **VALUE**: Verifies an externally started backend is detected over HTTP and never relaunched.
#[tokio::test]
async fn given_backend_already_serving_when_ensure_started_called_then_reports_already_running() {
    // GIVEN: A backend already answering on its port
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    let port = server.address().port();
    let target = server.uri();

    // WHEN: Ensuring started from the blocking pool
    let outcome = spawn_blocking(move || {
        let config = config_for_port(port);
        let probe = HttpProbe::new(config.probe_timeout());
        let runner = |_options: &ServeOptions| -> Result<(), LauncherError> {
            panic!("runner must not be invoked for a running backend")
        };
        let launcher = BackendLauncher::new(config, probe, runner).expect("valid config");
        launcher.ensure_started(&target)
    })
    .await
    .expect("launcher task should not panic");

    // THEN
    assert_eq!(outcome, LaunchOutcome::AlreadyRunning);
}
