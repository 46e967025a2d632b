use launcher_core::config::LauncherConfig;
use launcher_core::error::launcher::LauncherError;
use launcher_core::launcher::runner::{BackendRunner, ProcessRunner};

use models::ServeOptions;

fn default_options() -> ServeOptions {
    LauncherConfig::default()
        .serve_options()
        .expect("default options are valid")
}

/// **VALUE**: Verifies a missing backend binary becomes a Spawn error instead of a panic.
///
/// **WHY THIS MATTERS**: The runner executes on the detached launcher thread. A panic there
/// is invisible to the caller; an error is at least logged.
#[test]
fn given_missing_binary_when_run_called_then_returns_spawn_error() {
    // GIVEN: A binary that exists nowhere
    let runner = ProcessRunner::new("no-such-backend-binary-for-tests");

    // WHEN
    let result = runner.run(&default_options());

    // THEN
    assert!(
        matches!(result, Err(LauncherError::Spawn { .. })),
        "Expected spawn error, got {result:?}"
    );
}

#[cfg(unix)]
#[test]
fn given_backend_exits_cleanly_when_run_called_then_returns_ok() {
    // GIVEN: A "backend" that accepts any arguments and exits 0
    let runner = ProcessRunner::new("true").with_executable("/bin/true");

    // WHEN / THEN: run() waits for the exit and reports success
    assert!(runner.run(&default_options()).is_ok());
}

/// **VALUE**: Verifies a backend crashing on startup is reported with its exit status.
///
/// **BUG THIS CATCHES**: Would catch `run()` returning Ok for a non-zero exit, which would
/// hide "port already in use" style crashes from the log.
#[cfg(unix)]
#[test]
fn given_backend_exits_with_failure_when_run_called_then_returns_backend_error() {
    // GIVEN: A "backend" that exits 1
    let runner = ProcessRunner::new("false").with_executable("/bin/false");

    // WHEN
    let result = runner.run(&default_options());

    // THEN
    match result {
        Err(LauncherError::Backend { message, .. }) => {
            assert!(message.contains("/bin/false"), "Unexpected message: {message}")
        }
        other => panic!("Expected backend error, got {other:?}"),
    }
}
