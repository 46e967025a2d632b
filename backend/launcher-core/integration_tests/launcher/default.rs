use launcher_core::launcher::default_launcher;
use launcher_core::{BACKEND_SERVER_PORT, ensure_backend_started};

use models::LaunchOutcome;

use std::ptr;

// The process-wide launcher probes the real port 8000, so only the paths
// that never touch the network are exercised here.

/// **VALUE**: Verifies the free function ignores remote targets without any side effect.
///
/// **WHY THIS MATTERS**: `ensure_backend_started()` is the one call frontends make. Pointing
/// the frontend at a remote deployment must not start (or even probe for) a local server.
#[test]
fn given_remote_target_when_ensure_backend_started_called_then_unmanaged() {
    // GIVEN / WHEN: A remote target
    let outcome = ensure_backend_started("https://api.example.com");

    // THEN
    assert_eq!(outcome, LaunchOutcome::Unmanaged);
    assert!(!default_launcher().is_launching());
}

#[test]
fn given_repeated_access_when_default_launcher_called_then_returns_same_instance() {
    // GIVEN / WHEN
    let first = default_launcher();
    let second = default_launcher();

    // THEN: One process-wide state holder, built from the defaults
    assert!(ptr::eq(first, second));
    assert_eq!(first.config().port, BACKEND_SERVER_PORT);
}

/// **VALUE**: Verifies the process-wide launcher runs with settings that pass validation.
///
/// **BUG THIS CATCHES**: Would catch a default drifting to a value `BackendLauncher::new`
/// rejects, since the process-wide launcher is assembled without that check.
#[test]
fn given_default_launcher_when_config_checked_then_passes_validation() {
    // GIVEN / WHEN
    let config = default_launcher().config();

    // THEN
    assert!(config.validate().is_ok());
    assert!(config.serve_options().is_ok());
}
